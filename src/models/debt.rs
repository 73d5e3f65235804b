//! Debt tracker model
//!
//! Long-term money owed (credit cards, personal loans). Debts feed the net
//! position only; they never gate the daily survival budget.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::DebtId;
use super::money::Money;

/// Validation errors for debts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebtValidationError {
    EmptyLabel,
    NonPositiveTotal,
    NegativePaid,
}

impl fmt::Display for DebtValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "Debt label cannot be empty"),
            Self::NonPositiveTotal => write!(f, "Total owed must be positive"),
            Self::NegativePaid => write!(f, "Amount paid cannot be negative"),
        }
    }
}

impl std::error::Error for DebtValidationError {}

/// A tracked debt with running repayments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: DebtId,
    pub label: String,

    /// Original amount owed
    pub total_owed: Money,

    /// Sum of payments logged so far
    #[serde(default)]
    pub amount_paid: Money,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Debt {
    pub fn new(label: impl Into<String>, total_owed: Money) -> Self {
        let now = Utc::now();
        Self {
            id: DebtId::new(),
            label: label.into(),
            total_owed,
            amount_paid: Money::zero(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Amount still owed. Overpayment shows up as a negative remainder.
    pub fn remaining(&self) -> Money {
        self.total_owed - self.amount_paid
    }

    /// Whether the debt has been fully repaid
    pub fn is_paid_off(&self) -> bool {
        !self.remaining().is_positive()
    }

    /// Record a payment against this debt
    pub fn record_payment(&mut self, amount: Money) {
        self.amount_paid += amount;
        self.updated_at = Utc::now();
    }

    /// Repaid fraction in percent, 0-100
    pub fn progress_percent(&self) -> f64 {
        if !self.total_owed.is_positive() {
            return 100.0;
        }
        let pct = self.amount_paid.cents() as f64 / self.total_owed.cents() as f64 * 100.0;
        pct.clamp(0.0, 100.0)
    }

    pub fn validate(&self) -> Result<(), DebtValidationError> {
        if self.label.trim().is_empty() {
            return Err(DebtValidationError::EmptyLabel);
        }
        if !self.total_owed.is_positive() {
            return Err(DebtValidationError::NonPositiveTotal);
        }
        if self.amount_paid.is_negative() {
            return Err(DebtValidationError::NegativePaid);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_and_payments() {
        let mut card = Debt::new("Credit Card", Money::from_units(50000));
        assert_eq!(card.remaining(), Money::from_units(50000));
        assert!(!card.is_paid_off());

        card.record_payment(Money::from_units(20000));
        assert_eq!(card.remaining(), Money::from_units(30000));
        assert!((card.progress_percent() - 40.0).abs() < 1e-9);

        card.record_payment(Money::from_units(30000));
        assert!(card.is_paid_off());
        assert!((card.progress_percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_overpayment_goes_negative() {
        let mut loan = Debt::new("Loan", Money::from_units(100));
        loan.record_payment(Money::from_units(120));
        assert_eq!(loan.remaining(), Money::from_units(-20));
        assert!(loan.is_paid_off());
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            Debt::new("", Money::from_units(10)).validate(),
            Err(DebtValidationError::EmptyLabel)
        );
        assert_eq!(
            Debt::new("Loan", Money::zero()).validate(),
            Err(DebtValidationError::NonPositiveTotal)
        );
        assert!(Debt::new("Loan", Money::from_units(10)).validate().is_ok());
    }
}
