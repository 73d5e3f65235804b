//! Finance list formatting
//!
//! Tables for obligations, debts, expected income and the day's spend log.

use chrono::Local;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{DailySpendLog, Debt, ExpectedIncome, Money, RecurringObligation};

use super::report::{format_percentage, or_dash};

#[derive(Tabled)]
struct ObligationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Due Day")]
    day: u32,
}

#[derive(Tabled)]
struct DebtRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Owed")]
    owed: String,
    #[tabled(rename = "Paid")]
    paid: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Progress")]
    progress: String,
}

#[derive(Tabled)]
struct IncomeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Expected")]
    expected: String,
}

#[derive(Tabled)]
struct SpendRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn render<R: Tabled>(rows: Vec<R>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

/// Format recurring obligations as a table
pub fn format_obligation_list(obligations: &[RecurringObligation], symbol: &str) -> String {
    if obligations.is_empty() {
        return "No recurring obligations.".to_string();
    }

    let rows = obligations
        .iter()
        .map(|o| ObligationRow {
            id: o.id.to_string(),
            label: o.label.clone(),
            amount: o.amount.format_with_symbol(symbol),
            day: o.day_of_month,
        })
        .collect();

    let total: Money = obligations.iter().map(|o| o.amount).sum();
    format!(
        "{}\nMonthly total: {}",
        render::<ObligationRow>(rows),
        total.format_with_symbol(symbol)
    )
}

/// Format debts with repayment progress as a table
pub fn format_debt_list(debts: &[Debt], symbol: &str) -> String {
    if debts.is_empty() {
        return "No debts tracked.".to_string();
    }

    let rows = debts
        .iter()
        .map(|d| DebtRow {
            id: d.id.to_string(),
            label: d.label.clone(),
            owed: d.total_owed.format_with_symbol(symbol),
            paid: d.amount_paid.format_with_symbol(symbol),
            remaining: d.remaining().format_with_symbol(symbol),
            progress: format_percentage(d.progress_percent()),
        })
        .collect();

    let remaining: Money = debts.iter().map(|d| d.remaining()).sum();
    format!(
        "{}\nTotal remaining: {}",
        render::<DebtRow>(rows),
        remaining.format_with_symbol(symbol)
    )
}

/// Format expected income as a table
pub fn format_income_list(income: &[ExpectedIncome], symbol: &str) -> String {
    if income.is_empty() {
        return "No expected income.".to_string();
    }

    let rows = income
        .iter()
        .map(|i| IncomeRow {
            id: i.id.to_string(),
            label: i.label.clone(),
            amount: i.amount.format_with_symbol(symbol),
            expected: or_dash(i.expected_date),
        })
        .collect();

    render::<IncomeRow>(rows)
}

/// Format the day's spend log with its derived total
pub fn format_spend_log(log: &DailySpendLog, symbol: &str) -> String {
    if log.is_empty() {
        return "Nothing spent today.".to_string();
    }

    let rows = log
        .items
        .iter()
        .map(|s| SpendRow {
            id: s.id.to_string(),
            time: s.logged_at.with_timezone(&Local).format("%H:%M").to_string(),
            label: s.label.clone(),
            amount: s.amount.format_with_symbol(symbol),
        })
        .collect();

    format!(
        "{}\nSpent today: {}",
        render::<SpendRow>(rows),
        log.daily_spent().format_with_symbol(symbol)
    )
}
