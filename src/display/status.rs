//! Survival budget status formatting
//!
//! Renders a `LiquidityReport` as the terminal dashboard shown by
//! `journalme status`.

use crate::engine::LiquidityReport;

use super::report::{double_separator, format_bar, separator};

const WIDTH: usize = 60;

/// Format the full liquidity dashboard
pub fn format_status(report: &LiquidityReport, symbol: &str) -> String {
    let money = |m: crate::models::Money| m.format_with_symbol(symbol);
    let mut output = String::new();

    output.push_str(&format!("Survival Budget - {}\n", report.today));
    output.push_str(&double_separator(WIDTH));
    output.push('\n');

    output.push_str(&format!("{:<28} {:>16}\n", "Cash balance:", money(report.balance)));
    output.push_str(&format!(
        "{:<28} {:>16}\n",
        "Debt remaining:",
        money(report.total_debt_remaining)
    ));
    output.push_str(&format!("{:<28} {:>16}\n", "Net position:", money(report.net_position)));
    output.push_str(&separator(WIDTH));
    output.push('\n');

    if report.is_liquidity_short {
        output.push_str("LIQUIDITY SHORT: an upcoming obligation is not covered.\n");
    }

    output.push_str(&format!(
        "{:<28} {:>16}\n",
        "Daily survival budget:",
        money(report.daily_survival_budget)
    ));
    output.push_str(&format!("{:<28} {:>16}\n", "Spent today:", money(report.daily_spent)));
    output.push_str(&format!(
        "{:<28} {:>16}\n",
        "Remaining today:",
        money(report.remaining_survival_today)
    ));

    if report.daily_survival_budget.is_positive() {
        let spent = report.daily_spent.cents() as f64;
        let budget = report.daily_survival_budget.cents() as f64;
        output.push_str(&format!("[{}]\n", format_bar(spent, budget, 30)));
    }

    if report.is_unconstrained() {
        output.push_str("\nNo recurring obligations tracked; budget spreads the balance evenly.\n");
        return output;
    }

    if let Some(next) = report.next_obligation() {
        output.push_str(&format!(
            "\nNext deadline: {} ({}) due {} in {} day(s)\n",
            next.label,
            money(next.amount),
            next.due_date,
            next.days_until
        ));
    }

    if let Some(window) = &report.nearest_window {
        output.push_str(&format!(
            "Income arriving by {}: {} ({} entr{})\n",
            window.deadline,
            money(window.eligible_income),
            window.entry_count,
            if window.entry_count == 1 { "y" } else { "ies" }
        ));
    }
    if let Some(window) = &report.following_window {
        output.push_str(&format!(
            "Income arriving by {}: {}\n",
            window.deadline,
            money(window.eligible_income)
        ));
    }
    if report.future_pipeline.is_positive() {
        output.push_str(&format!(
            "Future pipeline (not counted): {}\n",
            money(report.future_pipeline)
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "{:<20} {:>4} {:>12} {:>10} {:>12}\n",
        "Obligation", "Days", "Amount", "Per Day", "Surplus"
    ));
    output.push_str(&separator(WIDTH));
    output.push('\n');

    for outlook in &report.obligations {
        let surplus = if outlook.is_short {
            format!("{} *", money(outlook.surplus))
        } else {
            money(outlook.surplus)
        };
        output.push_str(&format!(
            "{:<20} {:>4} {:>12} {:>10} {:>12}\n",
            super::report::truncate(&outlook.label, 20),
            outlook.days_until,
            money(outlook.amount),
            money(outlook.daily_cost),
            surplus
        ));
    }
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:<20} {:>4} {:>12} {:>10}\n",
        "Set aside per day",
        "",
        "",
        money(report.total_daily_set_aside)
    ));

    if report.is_liquidity_short {
        output.push_str("\n* = Short\n");
    }

    output
}

/// One-line summary used after finance mutations
pub fn format_status_line(report: &LiquidityReport, symbol: &str) -> String {
    let status = if report.is_liquidity_short {
        "SHORT"
    } else {
        "OK"
    };
    format!(
        "Balance {} | Survival {} / day | Left today {} | {}",
        report.balance.format_with_symbol(symbol),
        report.daily_survival_budget.format_with_symbol(symbol),
        report.remaining_survival_today.format_with_symbol(symbol),
        status
    )
}
