//! Debt service
//!
//! Tracks long-term debts and repayments. Payments are recorded against the
//! debt only; the cash balance is adjusted separately by the user.

use tracing::info;

use crate::error::{JournalError, JournalResult};
use crate::models::{Debt, Money};
use crate::storage::Storage;

/// Service for debt tracking
pub struct DebtService<'a> {
    storage: &'a Storage,
}

impl<'a> DebtService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Start tracking a new debt
    pub fn add(&self, label: &str, total_owed: Money) -> JournalResult<Debt> {
        let debt = Debt::new(label.trim(), total_owed);
        debt.validate()
            .map_err(|e| JournalError::Validation(e.to_string()))?;

        self.storage.debts.upsert(debt.clone())?;
        self.storage.debts.save()?;

        info!(debt_id = %debt.id, label = %debt.label, total = %debt.total_owed, "debt added");
        Ok(debt)
    }

    /// Log a repayment against a debt
    pub fn log_payment(&self, reference: &str, amount: Money) -> JournalResult<Debt> {
        if !amount.is_positive() {
            return Err(JournalError::Validation(
                "Payment amount must be positive".into(),
            ));
        }

        let mut debt = self.storage.debts.find(reference)?;
        debt.record_payment(amount);

        self.storage.debts.upsert(debt.clone())?;
        self.storage.debts.save()?;

        info!(
            debt_id = %debt.id,
            amount = %amount,
            remaining = %debt.remaining(),
            "debt payment logged"
        );
        Ok(debt)
    }

    /// Stop tracking a debt
    pub fn delete(&self, reference: &str) -> JournalResult<Debt> {
        let debt = self.storage.debts.find(reference)?;
        self.storage
            .debts
            .delete(debt.id)?
            .ok_or_else(|| JournalError::debt_not_found(reference))?;
        self.storage.debts.save()?;

        info!(debt_id = %debt.id, "debt deleted");
        Ok(debt)
    }

    pub fn list(&self) -> JournalResult<Vec<Debt>> {
        self.storage.debts.get_all()
    }

    /// Sum of what is still owed across all debts
    pub fn total_remaining(&self) -> JournalResult<Money> {
        Ok(self.list()?.iter().map(Debt::remaining).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::JournalPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = JournalPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_add_and_pay() {
        let (_temp_dir, storage) = create_test_storage();
        let service = DebtService::new(&storage);

        service.add("Credit Card", Money::from_units(5000)).unwrap();
        let debt = service
            .log_payment("credit card", Money::from_units(1500))
            .unwrap();

        assert_eq!(debt.amount_paid, Money::from_units(1500));
        assert_eq!(debt.remaining(), Money::from_units(3500));
        assert_eq!(
            service.list().unwrap()[0].remaining(),
            Money::from_units(3500)
        );
    }

    #[test]
    fn test_validation() {
        let (_temp_dir, storage) = create_test_storage();
        let service = DebtService::new(&storage);

        assert!(service.add(" ", Money::from_units(10)).is_err());
        assert!(service.add("Loan", Money::zero()).is_err());

        service.add("Loan", Money::from_units(10)).unwrap();
        assert!(service.log_payment("Loan", Money::zero()).is_err());
        assert!(service
            .log_payment("Mortgage", Money::from_units(1))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_total_remaining() {
        let (_temp_dir, storage) = create_test_storage();
        let service = DebtService::new(&storage);

        service.add("Card", Money::from_units(5000)).unwrap();
        service.add("Friend", Money::from_units(800)).unwrap();
        service.log_payment("Friend", Money::from_units(300)).unwrap();

        assert_eq!(service.total_remaining().unwrap(), Money::from_units(5500));
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = DebtService::new(&storage);
        service.add("Card", Money::from_units(5000)).unwrap();

        service.delete("Card").unwrap();
        assert_eq!(service.total_remaining().unwrap(), Money::zero());
    }
}
