//! Obligation service
//!
//! Recurring monthly bills. Validation happens here at the point of entry so
//! the engine only ever sees well-formed obligations.

use tracing::info;

use crate::error::{JournalError, JournalResult};
use crate::models::{Money, RecurringObligation};
use crate::storage::Storage;

/// Service for recurring obligation management
pub struct ObligationService<'a> {
    storage: &'a Storage,
}

impl<'a> ObligationService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a new recurring obligation
    pub fn add(
        &self,
        label: &str,
        amount: Money,
        day_of_month: u32,
    ) -> JournalResult<RecurringObligation> {
        let obligation = RecurringObligation::new(label.trim(), amount, day_of_month);
        obligation
            .validate()
            .map_err(|e| JournalError::Validation(e.to_string()))?;

        self.storage.obligations.upsert(obligation.clone())?;
        self.storage.obligations.save()?;

        info!(
            obligation_id = %obligation.id,
            label = %obligation.label,
            amount = %obligation.amount,
            day = obligation.day_of_month,
            "obligation added"
        );
        Ok(obligation)
    }

    /// Edit an obligation; `None` fields are left unchanged
    pub fn edit(
        &self,
        reference: &str,
        label: Option<&str>,
        amount: Option<Money>,
        day_of_month: Option<u32>,
    ) -> JournalResult<RecurringObligation> {
        let mut obligation = self.find(reference)?;

        if let Some(label) = label {
            obligation.set_label(label.trim());
        }
        if let Some(amount) = amount {
            obligation.set_amount(amount);
        }
        if let Some(day) = day_of_month {
            obligation.set_day_of_month(day);
        }

        obligation
            .validate()
            .map_err(|e| JournalError::Validation(e.to_string()))?;

        self.storage.obligations.upsert(obligation.clone())?;
        self.storage.obligations.save()?;

        info!(obligation_id = %obligation.id, "obligation updated");
        Ok(obligation)
    }

    /// Delete an obligation
    pub fn delete(&self, reference: &str) -> JournalResult<RecurringObligation> {
        let obligation = self.find(reference)?;
        self.storage
            .obligations
            .delete(obligation.id)?
            .ok_or_else(|| JournalError::obligation_not_found(reference))?;
        self.storage.obligations.save()?;

        info!(obligation_id = %obligation.id, label = %obligation.label, "obligation deleted");
        Ok(obligation)
    }

    /// All obligations ordered by day of month
    pub fn list(&self) -> JournalResult<Vec<RecurringObligation>> {
        self.storage.obligations.get_all()
    }

    /// Find an obligation by ID or label
    pub fn find(&self, reference: &str) -> JournalResult<RecurringObligation> {
        self.storage.obligations.find(reference)
    }
}
