pub mod account;
pub mod config;
pub mod expense;
pub mod report;
pub mod system;

use chrono::NaiveDate;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(account::definitions());
    commands.extend(expense::definitions());
    commands.extend(report::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {}", usage))
}

/// Converts a 1-based position typed by the user into a store index.
pub(crate) fn parse_position(raw: &str) -> Result<usize, CommandError> {
    match raw.trim().parse::<usize>() {
        Ok(position) if position >= 1 => Ok(position - 1),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{}` is not a valid expense number (use the # column from `list`)",
            raw
        ))),
    }
}

/// Parses an amount, tolerating a leading currency symbol.
pub(crate) fn parse_amount(raw: &str, symbol: &str) -> Result<f64, CommandError> {
    let trimmed = raw.trim();
    let digits = if symbol.is_empty() {
        trimmed
    } else {
        trimmed.strip_prefix(symbol).unwrap_or(trimmed)
    };
    match digits.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{}` is not a valid amount; enter a positive number",
            raw
        ))),
    }
}

/// Accepts `YYYY-MM-DD` or `today`.
pub(crate) fn parse_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, CommandError> {
    if raw.eq_ignore_ascii_case("today") {
        return Ok(today);
    }
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a date in YYYY-MM-DD form", raw))
    })
}
