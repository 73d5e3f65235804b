//! Finance service
//!
//! Owns the cash balance and today's spend log, and assembles the snapshot
//! the liquidity engine evaluates.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::engine::{has_day_changed, LiquidityEngine, LiquidityReport, LiquiditySnapshot};
use crate::error::{JournalError, JournalResult};
use crate::models::{DailySpendLog, Money, SpendItem};
use crate::storage::Storage;

/// Service for balance, spending and the daily report
pub struct FinanceService<'a> {
    storage: &'a Storage,
    engine: LiquidityEngine,
}

impl<'a> FinanceService<'a> {
    /// Create a new finance service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            engine: LiquidityEngine::new(),
        }
    }

    /// Use a custom divisor for the budget when no obligations exist
    pub fn with_unconstrained_divisor(mut self, divisor: u32) -> Self {
        self.engine = self.engine.with_unconstrained_divisor(divisor);
        self
    }

    /// Current cash balance
    pub fn balance(&self) -> JournalResult<Money> {
        Ok(self.storage.finance.get()?.balance.total)
    }

    /// Overwrite the cash balance. Negative balances are allowed.
    pub fn set_balance(&self, amount: Money) -> JournalResult<Money> {
        let previous = self.storage.finance.update(|finance| {
            let previous = finance.balance.total;
            finance.balance.total = amount;
            previous
        })?;
        self.storage.finance.save()?;

        info!(previous = %previous, balance = %amount, "balance set");
        Ok(amount)
    }

    /// Record a discretionary purchase and take it out of the balance
    pub fn log_spend(
        &self,
        label: &str,
        amount: Money,
        logged_at: DateTime<Utc>,
    ) -> JournalResult<SpendItem> {
        if !amount.is_positive() {
            return Err(JournalError::Validation(
                "Spend amount must be positive".into(),
            ));
        }
        let label = match label.trim() {
            "" => "Spend",
            trimmed => trimmed,
        };

        let item = SpendItem::new(label, amount, logged_at);
        let balance = self.storage.finance.update(|finance| {
            finance.balance.total -= amount;
            finance.spend_log.push(item.clone());
            finance.balance.total
        })?;
        self.storage.finance.save()?;

        info!(spend_id = %item.id, amount = %amount, balance = %balance, "spend logged");
        Ok(item)
    }

    /// Remove a spend item and put its amount back into the balance
    ///
    /// `reference` is the item's ID (or a leading fragment) or its label.
    pub fn delete_spend(&self, reference: &str) -> JournalResult<SpendItem> {
        let log = self.spend_state()?;
        let needle = reference.trim().to_lowercase();

        let matches: Vec<&SpendItem> = log
            .items
            .iter()
            .filter(|item| {
                item.id.matches_reference(reference) || item.label.to_lowercase() == needle
            })
            .collect();

        let id = match matches.as_slice() {
            [] => return Err(JournalError::spend_not_found(reference)),
            [item] => item.id,
            many => {
                return Err(JournalError::Validation(format!(
                    "'{}' matches {} spend items; use the ID instead",
                    reference,
                    many.len()
                )))
            }
        };

        let removed = self.storage.finance.update(|finance| {
            let removed = finance.spend_log.remove(id);
            if let Some(item) = &removed {
                finance.balance.total += item.amount;
            }
            removed
        })?;
        let removed = removed.ok_or_else(|| JournalError::spend_not_found(reference))?;
        self.storage.finance.save()?;

        info!(spend_id = %removed.id, amount = %removed.amount, "spend deleted");
        Ok(removed)
    }

    /// Today's spend log
    pub fn spend_state(&self) -> JournalResult<DailySpendLog> {
        Ok(self.storage.finance.get()?.spend_log)
    }

    /// Clear the spend log the first time this is called on a new day
    ///
    /// The balance is not touched: spending already left it when logged.
    /// Returns whether a reset happened.
    pub fn reset_day_if_needed(&self, today: NaiveDate) -> JournalResult<bool> {
        let last_reset = self.storage.state.get()?.last_spend_reset;
        if !has_day_changed(last_reset, today) {
            return Ok(false);
        }

        self.reset_day(today)?;
        Ok(true)
    }

    /// Clear the spend log now and mark `today` as reset
    ///
    /// Returns how many spend items were cleared.
    pub fn reset_day(&self, today: NaiveDate) -> JournalResult<usize> {
        let cleared = self.storage.finance.update(|finance| {
            let cleared = finance.spend_log.items.len();
            finance.spend_log.reset(today);
            cleared
        })?;
        self.storage
            .state
            .update(|state| state.last_spend_reset = Some(today))?;
        // Log before marker: a failed marker write only repeats the reset
        self.storage.finance.save()?;
        self.storage.state.save()?;

        info!(%today, cleared, "spend log reset");
        Ok(cleared)
    }

    /// Evaluate the liquidity report for `today` from current storage
    pub fn report(&self, today: NaiveDate) -> JournalResult<LiquidityReport> {
        let finance = self.storage.finance.get()?;
        let obligations = self.storage.obligations.get_all()?;
        let debts = self.storage.debts.get_all()?;
        let expected_income = self.storage.income.get_all()?;

        debug!(
            obligations = obligations.len(),
            debts = debts.len(),
            income = expected_income.len(),
            "building liquidity snapshot"
        );

        let snapshot = LiquiditySnapshot {
            today,
            balance: finance.balance.total,
            obligations: &obligations,
            debts: &debts,
            expected_income: &expected_income,
            daily_spent: finance.spend_log.daily_spent(),
        };

        Ok(self.engine.evaluate(&snapshot))
    }
}
