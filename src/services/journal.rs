//! Journal service

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::error::{JournalError, JournalResult};
use crate::models::JournalEntry;
use crate::storage::Storage;

pub struct JournalService<'a> {
    storage: &'a Storage,
}

impl<'a> JournalService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Write a new entry
    pub fn add(&self, content: &str, created_at: DateTime<Utc>) -> JournalResult<JournalEntry> {
        let content = content.trim();
        if content.is_empty() {
            return Err(JournalError::Validation(
                "Journal entry cannot be empty".into(),
            ));
        }

        let entry = JournalEntry::new(content, created_at);
        self.storage.entries.upsert(entry.clone())?;
        self.storage.entries.save()?;

        info!(entry_id = %entry.id, chars = entry.content.len(), "journal entry added");
        Ok(entry)
    }

    pub fn delete(&self, reference: &str) -> JournalResult<JournalEntry> {
        let entry = self.storage.entries.find(reference)?;
        self.storage
            .entries
            .delete(entry.id)?
            .ok_or_else(|| JournalError::entry_not_found(reference))?;
        self.storage.entries.save()?;

        info!(entry_id = %entry.id, "journal entry deleted");
        Ok(entry)
    }

    /// All entries, newest first
    pub fn list(&self) -> JournalResult<Vec<JournalEntry>> {
        self.storage.entries.get_all()
    }

    /// Entries whose content contains `query`, newest first
    pub fn search(&self, query: &str) -> JournalResult<Vec<JournalEntry>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|entry| entry.matches(query))
            .collect())
    }

    /// Entries written on `day`, newest first
    pub fn on_day(&self, day: NaiveDate) -> JournalResult<Vec<JournalEntry>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|entry| entry.day() == day)
            .collect())
    }

    /// The `limit` most recent entries
    pub fn recent(&self, limit: usize) -> JournalResult<Vec<JournalEntry>> {
        Ok(self.list()?.into_iter().take(limit).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::JournalPaths;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = JournalPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_add_rejects_blank() {
        let (_temp_dir, storage) = create_test_storage();
        let service = JournalService::new(&storage);

        assert!(service.add("   ", at(1, 9)).unwrap_err().is_validation());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_newest_first() {
        let (_temp_dir, storage) = create_test_storage();
        let service = JournalService::new(&storage);

        service.add("first", at(1, 9)).unwrap();
        service.add("third", at(3, 9)).unwrap();
        service.add("second", at(2, 9)).unwrap();

        let contents: Vec<_> = service
            .list()
            .unwrap()
            .into_iter()
            .map(|e| e.content)
            .collect();
        assert_eq!(contents, vec!["third", "second", "first"]);
        assert_eq!(service.recent(1).unwrap()[0].content, "third");
    }

    #[test]
    fn test_search_and_day_filter() {
        let (_temp_dir, storage) = create_test_storage();
        let service = JournalService::new(&storage);

        service.add("Felt anxious about rent", at(1, 8)).unwrap();
        service.add("Calm morning walk", at(1, 20)).unwrap();
        service.add("Paid the rent", at(2, 9)).unwrap();

        assert_eq!(service.search("RENT").unwrap().len(), 2);
        assert!(service.search("holiday").unwrap().is_empty());

        let day_one = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let entries = service.on_day(day_one).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, "Calm morning walk");
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = JournalService::new(&storage);
        let entry = service.add("note", at(1, 9)).unwrap();

        service.delete(&entry.id.to_string()).unwrap();
        assert!(service.list().unwrap().is_empty());
    }
}
