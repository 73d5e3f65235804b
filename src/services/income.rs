//! Expected income service
//!
//! Income stays pending until the user confirms it arrived. Clearing it
//! removes the record and adds the amount to the cash balance in one step.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{JournalError, JournalResult};
use crate::models::{ExpectedIncome, Money};
use crate::storage::Storage;

/// Service for expected income
pub struct IncomeService<'a> {
    storage: &'a Storage,
}

impl<'a> IncomeService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record money the user expects to receive
    pub fn add(
        &self,
        label: &str,
        amount: Money,
        expected_date: Option<NaiveDate>,
    ) -> JournalResult<ExpectedIncome> {
        let income = ExpectedIncome::new(label.trim(), amount, expected_date);
        income
            .validate()
            .map_err(|e| JournalError::Validation(e.to_string()))?;

        self.storage.income.upsert(income.clone())?;
        self.storage.income.save()?;

        info!(
            income_id = %income.id,
            amount = %income.amount,
            expected_date = ?income.expected_date,
            "expected income added"
        );
        Ok(income)
    }

    /// Edit expected income
    ///
    /// `expected_date` is `None` to keep the date, `Some(None)` to make the
    /// income undated.
    pub fn edit(
        &self,
        reference: &str,
        label: Option<&str>,
        amount: Option<Money>,
        expected_date: Option<Option<NaiveDate>>,
    ) -> JournalResult<ExpectedIncome> {
        let mut income = self.storage.income.find(reference)?;

        if let Some(label) = label {
            income.set_label(label.trim());
        }
        if let Some(amount) = amount {
            income.set_amount(amount);
        }
        if let Some(date) = expected_date {
            income.set_expected_date(date);
        }

        income
            .validate()
            .map_err(|e| JournalError::Validation(e.to_string()))?;

        self.storage.income.upsert(income.clone())?;
        self.storage.income.save()?;

        info!(income_id = %income.id, "expected income updated");
        Ok(income)
    }

    /// Drop expected income without touching the balance
    pub fn delete(&self, reference: &str) -> JournalResult<ExpectedIncome> {
        let income = self.storage.income.find(reference)?;
        self.storage
            .income
            .delete(income.id)?
            .ok_or_else(|| JournalError::income_not_found(reference))?;
        self.storage.income.save()?;

        info!(income_id = %income.id, "expected income deleted");
        Ok(income)
    }

    /// Confirm receipt: remove the income and add it to the balance
    ///
    /// Returns the cleared income and the new balance.
    pub fn clear(&self, reference: &str) -> JournalResult<(ExpectedIncome, Money)> {
        let income = self.storage.income.find(reference)?;
        self.storage
            .income
            .delete(income.id)?
            .ok_or_else(|| JournalError::income_not_found(reference))?;

        let balance = self.storage.finance.update(|finance| {
            finance.balance.total += income.amount;
            finance.balance.total
        })?;

        // Balance first: if the second write fails the income stays pending
        // on disk instead of vanishing uncredited
        self.storage.finance.save()?;
        self.storage.income.save()?;

        info!(
            income_id = %income.id,
            amount = %income.amount,
            balance = %balance,
            "expected income received"
        );
        Ok((income, balance))
    }

    /// Dated income first by date, undated last
    pub fn list(&self) -> JournalResult<Vec<ExpectedIncome>> {
        self.storage.income.get_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::JournalPaths;
    use crate::models::FinanceState;
    use crate::storage::read_json;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = JournalPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_and_list_order() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);

        service
            .add("Bonus", Money::from_units(2000), None)
            .unwrap();
        service
            .add("Salary", Money::from_units(30000), Some(date(2025, 7, 1)))
            .unwrap();
        service
            .add("Refund", Money::from_units(500), Some(date(2025, 6, 20)))
            .unwrap();

        let labels: Vec<_> = service.list().unwrap().into_iter().map(|i| i.label).collect();
        assert_eq!(labels, vec!["Refund", "Salary", "Bonus"]);
    }

    #[test]
    fn test_add_validation() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);

        assert!(service.add("", Money::from_units(1), None).is_err());
        assert!(service.add("Salary", Money::zero(), None).is_err());
    }

    #[test]
    fn test_edit_clears_date() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        service
            .add("Salary", Money::from_units(30000), Some(date(2025, 7, 1)))
            .unwrap();

        let edited = service.edit("salary", None, None, Some(None)).unwrap();
        assert_eq!(edited.expected_date, None);

        let edited = service
            .edit("salary", Some("Pay"), Some(Money::from_units(31000)), None)
            .unwrap();
        assert_eq!(edited.label, "Pay");
        assert_eq!(edited.amount, Money::from_units(31000));
        assert_eq!(edited.expected_date, None);
    }

    #[test]
    fn test_clear_adds_to_balance() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        storage
            .finance
            .update(|f| f.balance.total = Money::from_units(100))
            .unwrap();
        service
            .add("Freelance", Money::from_units(3000), Some(date(2025, 6, 9)))
            .unwrap();

        let (cleared, balance) = service.clear("Freelance").unwrap();
        assert_eq!(cleared.amount, Money::from_units(3000));
        assert_eq!(balance, Money::from_units(3100));
        assert!(service.list().unwrap().is_empty());
        assert!(service.clear("Freelance").unwrap_err().is_not_found());
    }

    #[test]
    fn test_clear_credits_balance_before_dropping_income() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        service
            .add("Salary", Money::from_units(2000), Some(date(2025, 6, 8)))
            .unwrap();

        // Make the income store unwritable
        let income_file = storage.paths().income_file();
        std::fs::remove_file(&income_file).unwrap();
        std::fs::create_dir_all(income_file.join("blocked")).unwrap();

        assert!(service.clear("Salary").is_err());

        let finance: FinanceState = read_json(storage.paths().finance_file(), "finance").unwrap();
        assert_eq!(finance.balance.total, Money::from_units(2000));
    }

    #[test]
    fn test_delete_leaves_balance() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        service.add("Maybe", Money::from_units(50), None).unwrap();

        service.delete("maybe").unwrap();
        assert!(service.list().unwrap().is_empty());
        assert_eq!(
            storage.finance.get().unwrap().balance.total,
            Money::zero()
        );
    }
}
