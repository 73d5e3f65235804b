//! Daily survival budget calculation
//!
//! Given the cash balance, the recurring obligations, the pending expected
//! income and what has already been spent today, works out how much has to be
//! locked away per obligation each day, whether every upcoming deadline can be
//! met, and how much is safe to spend today.
//!
//! The calculation is a pure function of a [`LiquiditySnapshot`]. Callers
//! rebuild the snapshot from storage on every change; nothing is cached.

use chrono::NaiveDate;
use serde::Serialize;

use super::calendar::{days_until, deadline_date};
use crate::models::{Debt, ExpectedIncome, Money, ObligationId, RecurringObligation};

/// Days the balance is spread over when no obligation constrains it
pub const DEFAULT_UNCONSTRAINED_DIVISOR: u32 = 30;

/// Everything the engine reads, borrowed from the stores
#[derive(Debug, Clone, Copy)]
pub struct LiquiditySnapshot<'a> {
    pub today: NaiveDate,
    pub balance: Money,
    pub obligations: &'a [RecurringObligation],
    pub debts: &'a [Debt],
    pub expected_income: &'a [ExpectedIncome],
    pub daily_spent: Money,
}

/// Per-obligation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObligationOutlook {
    pub obligation_id: ObligationId,
    pub label: String,
    pub amount: Money,
    pub day_of_month: u32,
    /// Inclusive days left, always at least 1
    pub days_until: u32,
    pub due_date: NaiveDate,
    /// Amount to lock away each day, rounded up to a whole unit
    pub daily_cost: Money,
    /// Expected income arriving on or before `due_date`
    pub eligible_income: Money,
    /// `balance + eligible_income - amount`
    pub surplus: Money,
    pub is_short: bool,
}

/// Income that lands by a given deadline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeWindow {
    pub deadline: NaiveDate,
    pub eligible_income: Money,
    pub entry_count: usize,
}

/// Result of one engine run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiquidityReport {
    pub today: NaiveDate,
    pub balance: Money,
    /// Obligations ordered by nearest deadline first
    pub obligations: Vec<ObligationOutlook>,
    /// Income eligible for the nearest deadline
    pub nearest_window: Option<IncomeWindow>,
    /// Income eligible for the next distinct deadline after the nearest one
    pub following_window: Option<IncomeWindow>,
    /// Undated income plus income dated after every tracked deadline
    pub future_pipeline: Money,
    /// Sum of every obligation's daily set-aside
    pub total_daily_set_aside: Money,
    pub is_liquidity_short: bool,
    pub daily_survival_budget: Money,
    pub daily_spent: Money,
    /// Never negative: overspending clamps to zero and does not carry over
    pub remaining_survival_today: Money,
    pub total_debt_remaining: Money,
    /// `balance - total_debt_remaining`
    pub net_position: Money,
}

impl LiquidityReport {
    /// The obligation that gates today's budget
    pub fn next_obligation(&self) -> Option<&ObligationOutlook> {
        self.obligations.first()
    }

    /// Obligations that cannot be met by their own deadline
    pub fn shortfalls(&self) -> impl Iterator<Item = &ObligationOutlook> {
        self.obligations.iter().filter(|o| o.is_short)
    }

    /// True when no obligation constrains the budget
    pub fn is_unconstrained(&self) -> bool {
        self.obligations.is_empty()
    }
}

/// Survival budget calculator
#[derive(Debug, Clone, Copy)]
pub struct LiquidityEngine {
    unconstrained_divisor: u32,
}

impl Default for LiquidityEngine {
    fn default() -> Self {
        Self {
            unconstrained_divisor: DEFAULT_UNCONSTRAINED_DIVISOR,
        }
    }
}

impl LiquidityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different divisor for the no-obligation case (0 is treated as 1)
    pub fn with_unconstrained_divisor(mut self, divisor: u32) -> Self {
        self.unconstrained_divisor = divisor.max(1);
        self
    }

    /// Daily set-aside for one obligation
    pub fn daily_cost(today: NaiveDate, obligation: &RecurringObligation) -> Money {
        obligation
            .amount
            .div_ceil_units(days_until(today, obligation.day_of_month))
    }

    /// Run the calculation
    pub fn evaluate(&self, snapshot: &LiquiditySnapshot<'_>) -> LiquidityReport {
        let today = snapshot.today;
        let balance = snapshot.balance;

        let mut obligations: Vec<ObligationOutlook> = snapshot
            .obligations
            .iter()
            .map(|obligation| outlook_for(today, balance, obligation, snapshot.expected_income))
            .collect();
        obligations.sort_by(|a, b| {
            a.days_until
                .cmp(&b.days_until)
                .then_with(|| a.label.cmp(&b.label))
        });

        let nearest_window = obligations
            .first()
            .map(|next| income_window(next.due_date, snapshot.expected_income));

        let following_window = obligations.first().and_then(|next| {
            obligations
                .iter()
                .find(|o| o.due_date > next.due_date)
                .map(|o| income_window(o.due_date, snapshot.expected_income))
        });

        let last_deadline = obligations.iter().map(|o| o.due_date).max();
        let future_pipeline: Money = snapshot
            .expected_income
            .iter()
            .filter(|income| match (income.expected_date, last_deadline) {
                (Some(date), Some(deadline)) => date > deadline,
                _ => true,
            })
            .map(|income| income.amount)
            .sum();

        let total_daily_set_aside: Money = obligations.iter().map(|o| o.daily_cost).sum();
        let is_liquidity_short = obligations.iter().any(|o| o.is_short);

        let daily_survival_budget = match obligations.first() {
            None => balance.div_floor(self.unconstrained_divisor),
            Some(_) if is_liquidity_short => Money::zero(),
            Some(next) => next.surplus.clamp_non_negative().div_floor(next.days_until),
        };

        let remaining_survival_today =
            (daily_survival_budget - snapshot.daily_spent).clamp_non_negative();

        let total_debt_remaining: Money = snapshot.debts.iter().map(Debt::remaining).sum();
        let net_position = balance - total_debt_remaining;

        tracing::debug!(
            %today,
            balance = balance.cents(),
            obligations = obligations.len(),
            is_liquidity_short,
            daily_survival_budget = daily_survival_budget.cents(),
            remaining_survival_today = remaining_survival_today.cents(),
            "evaluated liquidity"
        );

        LiquidityReport {
            today,
            balance,
            obligations,
            nearest_window,
            following_window,
            future_pipeline,
            total_daily_set_aside,
            is_liquidity_short,
            daily_survival_budget,
            daily_spent: snapshot.daily_spent,
            remaining_survival_today,
            total_debt_remaining,
            net_position,
        }
    }
}

fn outlook_for(
    today: NaiveDate,
    balance: Money,
    obligation: &RecurringObligation,
    expected_income: &[ExpectedIncome],
) -> ObligationOutlook {
    let days = days_until(today, obligation.day_of_month);
    let due_date = deadline_date(today, obligation.day_of_month);
    let eligible_income = income_window(due_date, expected_income).eligible_income;
    let surplus = balance + eligible_income - obligation.amount;

    ObligationOutlook {
        obligation_id: obligation.id,
        label: obligation.label.clone(),
        amount: obligation.amount,
        day_of_month: obligation.day_of_month,
        days_until: days,
        due_date,
        daily_cost: obligation.amount.div_ceil_units(days),
        eligible_income,
        surplus,
        // A zero-amount bill never makes anything short
        is_short: obligation.amount.is_positive() && surplus.is_negative(),
    }
}

fn income_window(deadline: NaiveDate, expected_income: &[ExpectedIncome]) -> IncomeWindow {
    let eligible: Vec<&ExpectedIncome> = expected_income
        .iter()
        .filter(|income| income.arrives_by(deadline))
        .collect();

    IncomeWindow {
        deadline,
        eligible_income: eligible.iter().map(|income| income.amount).sum(),
        entry_count: eligible.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    fn obligation(label: &str, amount: i64, day: u32) -> RecurringObligation {
        RecurringObligation::new(label, units(amount), day)
    }

    fn income(label: &str, amount: i64, on: Option<NaiveDate>) -> ExpectedIncome {
        ExpectedIncome::new(label, units(amount), on)
    }

    fn run(
        today: NaiveDate,
        balance: i64,
        obligations: &[RecurringObligation],
        expected_income: &[ExpectedIncome],
        daily_spent: i64,
    ) -> LiquidityReport {
        LiquidityEngine::new().evaluate(&LiquiditySnapshot {
            today,
            balance: units(balance),
            obligations,
            debts: &[],
            expected_income,
            daily_spent: units(daily_spent),
        })
    }

    #[test]
    fn test_rent_exactly_covered() {
        // Day 5 of a 30-day month, rent of 10000 due on the 11th
        let obligations = [obligation("Rent", 10000, 11)];
        let report = run(date(2025, 6, 5), 10000, &obligations, &[], 0);

        let rent = report.next_obligation().unwrap();
        assert_eq!(rent.days_until, 7);
        assert_eq!(rent.daily_cost, units(1429));
        assert_eq!(rent.surplus, Money::zero());
        assert!(!report.is_liquidity_short);
        assert_eq!(report.daily_survival_budget, Money::zero());
    }

    #[test]
    fn test_emi_short_despite_income() {
        let obligations = [obligation("EMI", 10813, 13)];
        let incoming = [income("Stipend", 3000, Some(date(2025, 6, 10)))];
        let report = run(date(2025, 6, 1), 5000, &obligations, &incoming, 0);

        let emi = report.next_obligation().unwrap();
        assert_eq!(emi.days_until, 13);
        assert_eq!(emi.eligible_income, units(3000));
        assert_eq!(emi.surplus, units(-2813));
        assert!(report.is_liquidity_short);
        assert_eq!(report.daily_survival_budget, Money::zero());
    }

    #[test]
    fn test_no_obligations_spreads_over_thirty_days() {
        let report = run(date(2025, 6, 1), 50000, &[], &[], 0);

        assert!(report.is_unconstrained());
        assert!(!report.is_liquidity_short);
        // 50000 / 30 = 1666.67, rounded down to the cent
        assert_eq!(report.daily_survival_budget, Money::from_cents(166_666));
        assert_eq!(report.total_daily_set_aside, Money::zero());
    }

    #[test]
    fn test_custom_unconstrained_divisor() {
        let engine = LiquidityEngine::new().with_unconstrained_divisor(10);
        let report = engine.evaluate(&LiquiditySnapshot {
            today: date(2025, 6, 1),
            balance: units(1000),
            obligations: &[],
            debts: &[],
            expected_income: &[],
            daily_spent: Money::zero(),
        });
        assert_eq!(report.daily_survival_budget, units(100));
    }

    #[test]
    fn test_surplus_spread_over_days_until_deadline() {
        let obligations = [obligation("Rent", 10000, 11)];
        let report = run(date(2025, 6, 5), 17000, &obligations, &[], 0);

        // (17000 - 10000) / 7
        assert!(!report.is_liquidity_short);
        assert_eq!(report.daily_survival_budget, units(1000));
        assert_eq!(report.remaining_survival_today, units(1000));
    }

    #[test]
    fn test_balance_covering_obligation_is_not_short() {
        let obligations = [obligation("Rent", 10000, 11)];
        for balance in [10000, 10001, 50000] {
            let report = run(date(2025, 6, 5), balance, &obligations, &[], 0);
            assert!(!report.is_liquidity_short);
        }
    }

    #[test]
    fn test_remaining_today_never_negative() {
        let obligations = [obligation("Rent", 10000, 11)];
        for spent in [0, 999, 1000, 1001, 1_000_000] {
            let report = run(date(2025, 6, 5), 17000, &obligations, &[], spent);
            assert!(!report.remaining_survival_today.is_negative());
        }

        let report = run(date(2025, 6, 5), 17000, &obligations, &[], 1500);
        assert_eq!(report.remaining_survival_today, Money::zero());
        assert_eq!(report.daily_spent, units(1500));
    }

    #[test]
    fn test_income_after_deadline_does_not_help() {
        let obligations = [obligation("Rent", 10000, 11)];
        let late = [income("Salary", 20000, Some(date(2025, 6, 12)))];
        let report = run(date(2025, 6, 5), 4000, &obligations, &late, 0);

        let rent = report.next_obligation().unwrap();
        assert_eq!(rent.eligible_income, Money::zero());
        assert!(report.is_liquidity_short);
        assert_eq!(report.future_pipeline, units(20000));
    }

    #[test]
    fn test_income_on_deadline_counts() {
        let obligations = [obligation("Rent", 10000, 11)];
        let on_time = [income("Salary", 6000, Some(date(2025, 6, 11)))];
        let report = run(date(2025, 6, 5), 4000, &obligations, &on_time, 0);

        assert!(!report.is_liquidity_short);
        assert_eq!(report.nearest_window.as_ref().unwrap().eligible_income, units(6000));
        assert_eq!(report.nearest_window.as_ref().unwrap().entry_count, 1);
    }

    #[test]
    fn test_undated_income_is_pipeline_only() {
        let obligations = [obligation("Rent", 10000, 11)];
        let maybe = [income("Freelance", 50000, None)];
        let report = run(date(2025, 6, 5), 4000, &obligations, &maybe, 0);

        assert!(report.is_liquidity_short);
        assert_eq!(report.future_pipeline, units(50000));
    }

    #[test]
    fn test_later_deadline_checked_with_its_own_income() {
        // Rent on the 11th is covered by cash; EMI on the 13th needs the
        // salary that lands on the 12th, which rent cannot count.
        let obligations = [obligation("EMI", 15000, 13), obligation("Rent", 10000, 11)];
        let incoming = [income("Salary", 6000, Some(date(2025, 6, 12)))];
        let report = run(date(2025, 6, 5), 10000, &obligations, &incoming, 0);

        assert_eq!(report.obligations[0].label, "Rent");
        assert_eq!(report.obligations[1].label, "EMI");
        assert!(!report.obligations[0].is_short);
        assert_eq!(report.obligations[1].eligible_income, units(6000));
        assert!(!report.obligations[1].is_short);
        assert!(!report.is_liquidity_short);

        let following = report.following_window.unwrap();
        assert_eq!(following.deadline, date(2025, 6, 13));
        assert_eq!(following.eligible_income, units(6000));
        assert_eq!(report.nearest_window.unwrap().eligible_income, Money::zero());
    }

    #[test]
    fn test_shortage_on_later_deadline_flags_whole_report() {
        let obligations = [obligation("Rent", 5000, 11), obligation("EMI", 20000, 13)];
        let report = run(date(2025, 6, 5), 10000, &obligations, &[], 0);

        assert!(!report.obligations[0].is_short);
        assert!(report.obligations[1].is_short);
        assert!(report.is_liquidity_short);
        assert_eq!(report.daily_survival_budget, Money::zero());
        assert_eq!(report.shortfalls().count(), 1);
    }

    #[test]
    fn test_rolled_over_deadline_sorts_after_upcoming_one() {
        // Today is the 12th: rent (11th) has rolled to next month
        let obligations = [obligation("Rent", 10000, 11), obligation("EMI", 10813, 13)];
        let report = run(date(2025, 6, 12), 30000, &obligations, &[], 0);

        assert_eq!(report.obligations[0].label, "EMI");
        assert_eq!(report.obligations[0].days_until, 2);
        assert_eq!(report.obligations[1].label, "Rent");
        assert_eq!(report.obligations[1].days_until, 30);
        assert_eq!(report.obligations[1].due_date, date(2025, 7, 11));
    }

    #[test]
    fn test_zero_amount_obligation() {
        let obligations = [obligation("Placeholder", 0, 11)];
        let report = run(date(2025, 6, 5), 700, &obligations, &[], 0);

        let outlook = report.next_obligation().unwrap();
        assert_eq!(outlook.daily_cost, Money::zero());
        assert!(!outlook.is_short);
        assert!(!report.is_liquidity_short);
        assert_eq!(report.daily_survival_budget, units(100));
    }

    #[test]
    fn test_negative_balance_is_short() {
        let obligations = [obligation("Rent", 10000, 11)];
        let report = run(date(2025, 6, 5), -500, &obligations, &[], 0);

        assert!(report.is_liquidity_short);
        assert_eq!(report.daily_survival_budget, Money::zero());
        assert_eq!(report.remaining_survival_today, Money::zero());
        assert_eq!(report.next_obligation().unwrap().surplus, units(-10500));
    }

    #[test]
    fn test_negative_balance_without_obligations_propagates() {
        let report = run(date(2025, 6, 5), -3000, &[], &[], 0);
        assert_eq!(report.daily_survival_budget, units(-100));
        assert_eq!(report.remaining_survival_today, Money::zero());
    }

    #[test]
    fn test_daily_cost_never_under_funds() {
        let today = date(2025, 2, 14);
        for day in 1..=31 {
            let bill = obligation("Bill", 9999, day);
            let days = days_until(today, day);
            let daily = LiquidityEngine::daily_cost(today, &bill);
            assert!(daily.cents() * i64::from(days) >= bill.amount.cents());
        }
    }

    #[test]
    fn test_total_daily_set_aside() {
        let obligations = [obligation("Rent", 10000, 11), obligation("EMI", 10813, 13)];
        let report = run(date(2025, 6, 1), 50000, &obligations, &[], 0);

        // ceil(10000/11) + ceil(10813/13)
        assert_eq!(report.total_daily_set_aside, units(910 + 832));
    }

    #[test]
    fn test_net_position_ignores_budget_logic() {
        let mut card = Debt::new("Credit Card", units(40000));
        card.record_payment(units(15000));
        let loan = Debt::new("Loan", units(5000));
        let debts = [card, loan];

        let report = LiquidityEngine::new().evaluate(&LiquiditySnapshot {
            today: date(2025, 6, 1),
            balance: units(12000),
            obligations: &[],
            debts: &debts,
            expected_income: &[],
            daily_spent: Money::zero(),
        });

        assert_eq!(report.total_debt_remaining, units(30000));
        assert_eq!(report.net_position, units(-18000));
        assert!(!report.is_liquidity_short);
        assert_eq!(report.daily_survival_budget, units(400));
    }
}
