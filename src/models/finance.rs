//! Cash balance and daily spend log
//!
//! The balance is the only persisted representation of liquid cash. The spend
//! log holds today's discretionary spending; its running total is always
//! derived from the items so the two can never disagree.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::SpendId;
use super::money::Money;

/// Liquid cash on hand. May go negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashBalance {
    pub total: Money,
}

impl CashBalance {
    pub fn new(total: Money) -> Self {
        Self { total }
    }
}

/// A single discretionary purchase logged today
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendItem {
    pub id: SpendId,
    pub label: String,
    pub amount: Money,
    pub logged_at: DateTime<Utc>,
}

impl SpendItem {
    pub fn new(label: impl Into<String>, amount: Money, logged_at: DateTime<Utc>) -> Self {
        Self {
            id: SpendId::new(),
            label: label.into(),
            amount,
            logged_at,
        }
    }
}

/// Today's spending, in logging order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySpendLog {
    /// Day the log belongs to; `None` until the first reset or spend
    #[serde(default)]
    pub day: Option<NaiveDate>,

    #[serde(default)]
    pub items: Vec<SpendItem>,
}

impl DailySpendLog {
    /// Total spent today
    pub fn daily_spent(&self) -> Money {
        self.items.iter().map(|item| item.amount).sum()
    }

    pub fn push(&mut self, item: SpendItem) {
        self.items.push(item);
    }

    /// Remove an item, returning it if it was present
    pub fn remove(&mut self, id: SpendId) -> Option<SpendItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Empty the log and stamp it with the new day
    pub fn reset(&mut self, day: NaiveDate) {
        self.items.clear();
        self.day = Some(day);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Everything persisted in `finance.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceState {
    #[serde(default)]
    pub balance: CashBalance,

    #[serde(default)]
    pub spend_log: DailySpendLog,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_spent_is_derived() {
        let mut log = DailySpendLog::default();
        assert_eq!(log.daily_spent(), Money::zero());

        log.push(SpendItem::new("Tea", Money::from_units(20), Utc::now()));
        log.push(SpendItem::new("Bus", Money::from_units(45), Utc::now()));
        assert_eq!(log.daily_spent(), Money::from_units(65));
    }

    #[test]
    fn test_remove_item() {
        let mut log = DailySpendLog::default();
        let tea = SpendItem::new("Tea", Money::from_units(20), Utc::now());
        let tea_id = tea.id;
        log.push(tea);
        log.push(SpendItem::new("Bus", Money::from_units(45), Utc::now()));

        let removed = log.remove(tea_id).unwrap();
        assert_eq!(removed.label, "Tea");
        assert_eq!(log.daily_spent(), Money::from_units(45));
        assert!(log.remove(tea_id).is_none());
    }

    #[test]
    fn test_reset() {
        let mut log = DailySpendLog::default();
        log.push(SpendItem::new("Tea", Money::from_units(20), Utc::now()));

        let day = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        log.reset(day);

        assert!(log.is_empty());
        assert_eq!(log.day, Some(day));
        assert_eq!(log.daily_spent(), Money::zero());
    }
}
