//! Tabular dump of expense records for spreadsheet tools.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::{errors::Result, ledger::Expense};

const HEADER: [&str; 4] = ["description", "amount", "category", "date"];

#[derive(Serialize)]
struct ExportRow<'a> {
    description: &'a str,
    amount: f64,
    category: &'a str,
    date: String,
}

impl<'a> From<&'a Expense> for ExportRow<'a> {
    fn from(expense: &'a Expense) -> Self {
        Self {
            description: expense.description(),
            amount: expense.amount(),
            category: expense.category(),
            date: expense.date().format("%Y-%m-%d").to_string(),
        }
    }
}

/// Writes a header plus one CSV row per record, in the given order. Returns the row count.
pub fn export_csv<'a, I>(records: I, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(HEADER)?;
    let mut rows = 0;
    for expense in records {
        writer.serialize(ExportRow::from(expense))?;
        rows += 1;
    }
    writer.flush()?;
    info!(rows, path = %path.display(), "exported expenses");
    Ok(rows)
}
