//! Expected income model
//!
//! A promise of future cash. It stays pending until the user confirms
//! receipt, at which point it is removed and its amount lands in the balance.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::IncomeId;
use super::money::Money;

/// Validation errors for expected income
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    EmptyLabel,
    NonPositiveAmount,
}

impl std::fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "Income label cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Expected income must be positive"),
        }
    }
}

impl std::error::Error for IncomeValidationError {}

/// An incoming payment the user expects to receive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedIncome {
    pub id: IncomeId,
    pub label: String,
    pub amount: Money,

    /// When the money should arrive. Undated income is pipeline only and
    /// never counts toward a deadline.
    #[serde(default)]
    pub expected_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExpectedIncome {
    pub fn new(label: impl Into<String>, amount: Money, expected_date: Option<NaiveDate>) -> Self {
        let now = Utc::now();
        Self {
            id: IncomeId::new(),
            label: label.into(),
            amount,
            expected_date,
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

    pub fn set_expected_date(&mut self, expected_date: Option<NaiveDate>) {
        self.expected_date = expected_date;
        self.updated_at = Utc::now();
    }

    /// Whether this income arrives on or before `deadline`
    pub fn arrives_by(&self, deadline: NaiveDate) -> bool {
        self.expected_date.is_some_and(|date| date <= deadline)
    }

    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if self.label.trim().is_empty() {
            return Err(IncomeValidationError::EmptyLabel);
        }
        if !self.amount.is_positive() {
            return Err(IncomeValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}
