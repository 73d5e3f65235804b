//! Record repository for JSON storage
//!
//! Every list-shaped entity (obligations, debts, expected income, journal
//! entries, tasks, goals) is kept in its own JSON array file and cached in
//! memory behind a lock.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::JournalError;
use crate::models::{
    Debt, DebtId, EntryId, ExpectedIncome, Goal, GoalId, IncomeId, JournalEntry, ObligationId,
    RecurringObligation, Task, TaskId,
};

use super::file_io::{read_json, write_json_atomic};

/// An entity stored in a [`RecordRepository`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash + Display;

    /// Human name of the entity kind, used in "not found" errors
    const KIND: &'static str;

    fn id(&self) -> Self::Id;

    /// Text users refer to the record by
    fn label(&self) -> &str;

    /// Whether `reference` is a full or leading fragment of this record's ID
    fn matches_id(&self, reference: &str) -> bool;

    /// Order records are listed and saved in; ties fall back to label, then ID
    fn display_order(a: &Self, b: &Self) -> Ordering;
}

impl Record for RecurringObligation {
    type Id = ObligationId;
    const KIND: &'static str = "Obligation";

    fn id(&self) -> ObligationId {
        self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn matches_id(&self, reference: &str) -> bool {
        self.id.matches_reference(reference)
    }

    fn display_order(a: &Self, b: &Self) -> Ordering {
        a.day_of_month
            .cmp(&b.day_of_month)
            .then_with(|| a.label.cmp(&b.label))
    }
}

impl Record for Debt {
    type Id = DebtId;
    const KIND: &'static str = "Debt";

    fn id(&self) -> DebtId {
        self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn matches_id(&self, reference: &str) -> bool {
        self.id.matches_reference(reference)
    }

    fn display_order(a: &Self, b: &Self) -> Ordering {
        a.created_at.cmp(&b.created_at)
    }
}

impl Record for ExpectedIncome {
    type Id = IncomeId;
    const KIND: &'static str = "Expected income";

    fn id(&self) -> IncomeId {
        self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn matches_id(&self, reference: &str) -> bool {
        self.id.matches_reference(reference)
    }

    // Dated income by date, undated income last
    fn display_order(a: &Self, b: &Self) -> Ordering {
        match (a.expected_date, b.expected_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| a.created_at.cmp(&b.created_at))
    }
}

impl Record for JournalEntry {
    type Id = EntryId;
    const KIND: &'static str = "Journal entry";

    fn id(&self) -> EntryId {
        self.id
    }

    fn label(&self) -> &str {
        &self.content
    }

    fn matches_id(&self, reference: &str) -> bool {
        self.id.matches_reference(reference)
    }

    // Newest first
    fn display_order(a: &Self, b: &Self) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }
}

impl Record for Task {
    type Id = TaskId;
    const KIND: &'static str = "Task";

    fn id(&self) -> TaskId {
        self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn matches_id(&self, reference: &str) -> bool {
        self.id.matches_reference(reference)
    }

    fn display_order(a: &Self, b: &Self) -> Ordering {
        a.created_at.cmp(&b.created_at)
    }
}

impl Record for Goal {
    type Id = GoalId;
    const KIND: &'static str = "Goal";

    fn id(&self) -> GoalId {
        self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn matches_id(&self, reference: &str) -> bool {
        self.id.matches_reference(reference)
    }

    // Newest first
    fn display_order(a: &Self, b: &Self) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }
}

/// Repository for one list of records
pub struct RecordRepository<T: Record> {
    path: PathBuf,
    data: RwLock<HashMap<T::Id, T>>,
}

impl<T: Record> RecordRepository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load records from disk, replacing the in-memory cache
    pub fn load(&self) -> Result<(), JournalError> {
        let records: Vec<T> = read_json(&self.path, T::KIND)?;

        let mut data = self.data.write().map_err(|e| {
            JournalError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for record in records {
            data.insert(record.id(), record);
        }

        Ok(())
    }

    /// Save records to disk in display order
    pub fn save(&self) -> Result<(), JournalError> {
        let records = self.get_all()?;
        write_json_atomic(&self.path, &records)
    }

    pub fn get(&self, id: T::Id) -> Result<Option<T>, JournalError> {
        let data = self.data.read().map_err(|e| {
            JournalError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// All records in display order
    pub fn get_all(&self) -> Result<Vec<T>, JournalError> {
        let data = self.data.read().map_err(|e| {
            JournalError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut records: Vec<_> = data.values().cloned().collect();
        records.sort_by(|a, b| {
            T::display_order(a, b)
                .then_with(|| a.label().cmp(b.label()))
                .then_with(|| a.id().to_string().cmp(&b.id().to_string()))
        });
        Ok(records)
    }

    /// Resolve a user-typed reference to a single record
    ///
    /// The reference may be a case-insensitive label or an ID (full,
    /// display form or leading fragment); labels win. A reference that matches more than one
    /// record is rejected rather than guessed.
    pub fn find(&self, reference: &str) -> Result<T, JournalError> {
        let records = self.get_all()?;

        let needle = reference.trim().to_lowercase();
        let by_label: Vec<&T> = records
            .iter()
            .filter(|r| r.label().to_lowercase() == needle)
            .collect();
        let candidates: Vec<&T> = if by_label.is_empty() {
            records.iter().filter(|r| r.matches_id(reference)).collect()
        } else {
            by_label
        };

        match candidates.as_slice() {
            [] => Err(JournalError::NotFound {
                entity_type: T::KIND,
                identifier: reference.to_string(),
            }),
            [record] => Ok((*record).clone()),
            many => Err(JournalError::Validation(format!(
                "'{}' matches {} {} records; use the ID instead",
                reference,
                many.len(),
                T::KIND.to_lowercase()
            ))),
        }
    }

    /// Insert or update a record
    pub fn upsert(&self, record: T) -> Result<(), JournalError> {
        let mut data = self.data.write().map_err(|e| {
            JournalError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(record.id(), record);
        Ok(())
    }

    /// Delete a record, returning it if it existed
    pub fn delete(&self, id: T::Id) -> Result<Option<T>, JournalError> {
        let mut data = self.data.write().map_err(|e| {
            JournalError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id))
    }

    /// Replace every record at once (restore and import)
    pub fn replace_all(&self, records: Vec<T>) -> Result<(), JournalError> {
        let mut data = self.data.write().map_err(|e| {
            JournalError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for record in records {
            data.insert(record.id(), record);
        }
        Ok(())
    }

    pub fn count(&self) -> Result<usize, JournalError> {
        let data = self.data.read().map_err(|e| {
            JournalError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoalHorizon, Money};
    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::TempDir;

    fn create_test_repo<T: Record>() -> (TempDir, RecordRepository<T>) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.json");
        let repo = RecordRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo::<Debt>();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo::<RecurringObligation>();
        repo.load().unwrap();

        let rent = RecurringObligation::new("Rent", Money::from_units(10000), 11);
        let id = rent.id;
        repo.upsert(rent).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.label, "Rent");
        assert_eq!(retrieved.amount, Money::from_units(10000));
    }

    #[test]
    fn test_obligations_ordered_by_day() {
        let (_temp_dir, repo) = create_test_repo::<RecurringObligation>();
        repo.upsert(RecurringObligation::new("EMI", Money::from_units(10813), 13))
            .unwrap();
        repo.upsert(RecurringObligation::new("Rent", Money::from_units(10000), 11))
            .unwrap();
        repo.upsert(RecurringObligation::new("Internet", Money::from_units(700), 2))
            .unwrap();

        let labels: Vec<_> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(labels, vec!["Internet", "Rent", "EMI"]);
    }

    #[test]
    fn test_income_undated_last() {
        let (_temp_dir, repo) = create_test_repo::<ExpectedIncome>();
        let day = |d| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();

        repo.upsert(ExpectedIncome::new("Someday", Money::from_units(1), None))
            .unwrap();
        repo.upsert(ExpectedIncome::new("Late", Money::from_units(1), Some(day(20))))
            .unwrap();
        repo.upsert(ExpectedIncome::new("Early", Money::from_units(1), Some(day(3))))
            .unwrap();

        let labels: Vec<_> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|i| i.label)
            .collect();
        assert_eq!(labels, vec!["Early", "Late", "Someday"]);
    }

    #[test]
    fn test_entries_newest_first() {
        let (_temp_dir, repo) = create_test_repo::<JournalEntry>();
        let older = JournalEntry::new("older", Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap());
        let newer = JournalEntry::new("newer", Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap());
        repo.upsert(older).unwrap();
        repo.upsert(newer).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all[0].content, "newer");
        assert_eq!(all[1].content, "older");
    }

    #[test]
    fn test_goals_newest_first() {
        let (_temp_dir, repo) = create_test_repo::<Goal>();
        let jan = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
        let feb = Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0).unwrap();
        repo.upsert(Goal::new("Read 20 books", GoalHorizon::Yearly, jan))
            .unwrap();
        repo.upsert(Goal::new("Gym 3x", GoalHorizon::Weekly, feb)).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all[0].label, "Gym 3x");
        assert_eq!(all[1].label, "Read 20 books");
    }

    #[test]
    fn test_same_timestamp_orders_by_label() {
        let (_temp_dir, repo) = create_test_repo::<Goal>();
        let pinned = Utc.with_ymd_and_hms(2025, 6, 5, 0, 0, 0).unwrap();
        for label in ["Walk daily", "Budget weekly", "Save 10k", "Learn Rust"] {
            repo.upsert(Goal::new(label, GoalHorizon::Monthly, pinned))
                .unwrap();
        }

        let labels: Vec<_> = repo.get_all().unwrap().into_iter().map(|g| g.label).collect();
        assert_eq!(labels, ["Budget weekly", "Learn Rust", "Save 10k", "Walk daily"]);
    }

    #[test]
    fn test_find_by_label_and_id() {
        let (_temp_dir, repo) = create_test_repo::<Debt>();
        let debt = Debt::new("Credit Card", Money::from_units(5000));
        let id = debt.id;
        repo.upsert(debt).unwrap();

        assert_eq!(repo.find("credit card").unwrap().id, id);
        assert_eq!(repo.find(&id.to_string()).unwrap().id, id);
        assert_eq!(repo.find(&id.as_uuid().to_string()).unwrap().id, id);

        let err = repo.find("mortgage").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_find_ambiguous_label() {
        let (_temp_dir, repo) = create_test_repo::<Task>();
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
        repo.upsert(Task::new("Read", None, at)).unwrap();
        repo.upsert(Task::new("read", None, at)).unwrap();

        let err = repo.find("READ").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo::<RecurringObligation>();
        let rent = RecurringObligation::new("Rent", Money::from_units(10000), 11);
        let id = rent.id;
        repo.upsert(rent).unwrap();
        repo.save().unwrap();

        let repo2: RecordRepository<RecurringObligation> =
            RecordRepository::new(temp_dir.path().join("records.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.get(id).unwrap().unwrap().day_of_month, 11);
    }

    #[test]
    fn test_delete_and_replace_all() {
        let (_temp_dir, repo) = create_test_repo::<Debt>();
        let debt = Debt::new("Loan", Money::from_units(100));
        let id = debt.id;
        repo.upsert(debt).unwrap();

        assert!(repo.delete(id).unwrap().is_some());
        assert!(repo.delete(id).unwrap().is_none());

        repo.replace_all(vec![
            Debt::new("A", Money::from_units(1)),
            Debt::new("B", Money::from_units(2)),
        ])
        .unwrap();
        assert_eq!(repo.count().unwrap(), 2);
    }
}
