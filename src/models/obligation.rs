//! Recurring monthly obligation model
//!
//! A bill that falls due every calendar month on a fixed day ("jail" money
//! that has to be locked away before the due date). Only the current
//! definition is kept; editing replaces it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ObligationId;
use super::money::Money;

/// Validation errors for recurring obligations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObligationValidationError {
    EmptyLabel,
    NonPositiveAmount,
    DayOutOfRange(u32),
}

impl fmt::Display for ObligationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "Obligation label cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Obligation amount must be positive"),
            Self::DayOutOfRange(day) => {
                write!(f, "Day of month must be between 1 and 31, got {}", day)
            }
        }
    }
}

impl std::error::Error for ObligationValidationError {}

/// A bill that recurs every month on `day_of_month`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringObligation {
    pub id: ObligationId,

    /// Display label (e.g. "Rent")
    pub label: String,

    /// Amount due each month
    pub amount: Money,

    /// Day of the month the bill is due (1-31)
    pub day_of_month: u32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecurringObligation {
    /// Create a new recurring obligation
    pub fn new(label: impl Into<String>, amount: Money, day_of_month: u32) -> Self {
        let now = Utc::now();
        Self {
            id: ObligationId::new(),
            label: label.into(),
            amount,
            day_of_month,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.updated_at = Utc::now();
    }

    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    pub fn set_day_of_month(&mut self, day_of_month: u32) {
        self.day_of_month = day_of_month;
        self.updated_at = Utc::now();
    }

    /// Validate the obligation
    pub fn validate(&self) -> Result<(), ObligationValidationError> {
        if self.label.trim().is_empty() {
            return Err(ObligationValidationError::EmptyLabel);
        }
        if !self.amount.is_positive() {
            return Err(ObligationValidationError::NonPositiveAmount);
        }
        if !(1..=31).contains(&self.day_of_month) {
            return Err(ObligationValidationError::DayOutOfRange(self.day_of_month));
        }
        Ok(())
    }
}

impl fmt::Display for RecurringObligation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (day {})", self.label, self.day_of_month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_obligation() {
        let rent = RecurringObligation::new("Rent", Money::from_units(10000), 11);
        assert_eq!(rent.label, "Rent");
        assert_eq!(rent.day_of_month, 11);
        assert!(rent.validate().is_ok());
        assert_eq!(rent.to_string(), "Rent (day 11)");
    }

    #[test]
    fn test_validation() {
        let blank = RecurringObligation::new("  ", Money::from_units(10), 1);
        assert_eq!(blank.validate(), Err(ObligationValidationError::EmptyLabel));

        let zero = RecurringObligation::new("Gym", Money::zero(), 1);
        assert_eq!(
            zero.validate(),
            Err(ObligationValidationError::NonPositiveAmount)
        );

        let day0 = RecurringObligation::new("Gym", Money::from_units(10), 0);
        assert_eq!(
            day0.validate(),
            Err(ObligationValidationError::DayOutOfRange(0))
        );

        let day32 = RecurringObligation::new("Gym", Money::from_units(10), 32);
        assert!(day32.validate().is_err());

        let day31 = RecurringObligation::new("Gym", Money::from_units(10), 31);
        assert!(day31.validate().is_ok());
    }

    #[test]
    fn test_serialization() {
        let emi = RecurringObligation::new("EMI", Money::from_units(10813), 13);
        let json = serde_json::to_string(&emi).unwrap();
        let deserialized: RecurringObligation = serde_json::from_str(&json).unwrap();
        assert_eq!(emi, deserialized);
    }
}
