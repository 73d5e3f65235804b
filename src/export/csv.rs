//! CSV Export functionality
//!
//! Exports today's spend log, recurring obligations and debts to CSV format.

use std::io::Write;

use crate::error::{JournalError, JournalResult};
use crate::storage::Storage;

fn csv_error(e: csv::Error) -> JournalError {
    JournalError::Export(e.to_string())
}

/// Export the current day's spend log to CSV
pub fn export_spends_csv<W: Write + ?Sized>(
    storage: &Storage,
    writer: &mut W,
) -> JournalResult<()> {
    let log = storage.finance.get()?.spend_log;
    let day = log.day.map(|d| d.to_string()).unwrap_or_default();

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["ID", "Day", "Logged At", "Label", "Amount"])
        .map_err(csv_error)?;

    for item in &log.items {
        csv.write_record([
            item.id.to_string(),
            day.clone(),
            item.logged_at.to_rfc3339(),
            item.label.clone(),
            item.amount.to_string(),
        ])
        .map_err(csv_error)?;
    }

    csv.flush()
        .map_err(|e| JournalError::Export(e.to_string()))?;
    Ok(())
}

/// Export recurring obligations to CSV
pub fn export_obligations_csv<W: Write + ?Sized>(
    storage: &Storage,
    writer: &mut W,
) -> JournalResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["ID", "Label", "Amount", "Day Of Month"])
        .map_err(csv_error)?;

    for obligation in storage.obligations.get_all()? {
        csv.write_record([
            obligation.id.to_string(),
            obligation.label,
            obligation.amount.to_string(),
            obligation.day_of_month.to_string(),
        ])
        .map_err(csv_error)?;
    }

    csv.flush()
        .map_err(|e| JournalError::Export(e.to_string()))?;
    Ok(())
}

/// Export debts with their remaining balances to CSV
pub fn export_debts_csv<W: Write + ?Sized>(
    storage: &Storage,
    writer: &mut W,
) -> JournalResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["ID", "Label", "Total Owed", "Paid", "Remaining"])
        .map_err(csv_error)?;

    for debt in storage.debts.get_all()? {
        let remaining = debt.remaining();
        csv.write_record([
            debt.id.to_string(),
            debt.label,
            debt.total_owed.to_string(),
            debt.amount_paid.to_string(),
            remaining.to_string(),
        ])
        .map_err(csv_error)?;
    }

    csv.flush()
        .map_err(|e| JournalError::Export(e.to_string()))?;
    Ok(())
}
