use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{ExpenseError, Result};

/// A single dated expense entry.
///
/// Fields are private so that every instance has passed validation; edits build a new record
/// and replace the old one rather than mutating it. Text fields are kept exactly as given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    description: String,
    amount: f64,
    category: String,
    date: NaiveDate,
}

/// On-disk form of a record. Older files may omit `date`.
#[derive(Debug, Deserialize)]
pub struct StoredExpense {
    description: String,
    amount: f64,
    category: String,
    #[serde(default)]
    date: Option<NaiveDate>,
}

impl StoredExpense {
    /// Validates the record, dating it `fallback_date` when the file carried no date.
    pub fn into_expense(self, fallback_date: NaiveDate) -> Result<Expense> {
        let date = self.date.unwrap_or(fallback_date);
        Expense::new(self.description, self.amount, self.category, date)
    }

    pub fn has_date(&self) -> bool {
        self.date.is_some()
    }
}

impl Expense {
    /// Builds a validated record. Description and category must contain non-whitespace text.
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ExpenseError::InvalidInput(
                "description must not be empty".into(),
            ));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ExpenseError::InvalidInput(format!(
                "amount must be a positive number, got {amount}"
            )));
        }
        let category = category.into();
        if category.trim().is_empty() {
            return Err(ExpenseError::InvalidInput("category must not be empty".into()));
        }
        Ok(Self {
            description,
            amount,
            category,
            date,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Presentation label such as `2024-02-01 - Lunch: £10.00 (Food)`.
    pub fn label(&self, currency_symbol: &str) -> String {
        format!(
            "{} - {}: {}{:.2} ({})",
            self.date.format("%Y-%m-%d"),
            self.description,
            currency_symbol,
            self.amount,
            self.category
        )
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_rejects_blank_description_and_non_positive_amounts() {
        assert!(Expense::new("  ", 5.0, "Food", date(2024, 1, 1)).is_err());
        assert!(Expense::new("Lunch", 0.0, "Food", date(2024, 1, 1)).is_err());
        assert!(Expense::new("Lunch", -3.5, "Food", date(2024, 1, 1)).is_err());
        assert!(Expense::new("Lunch", f64::NAN, "Food", date(2024, 1, 1)).is_err());
        assert!(Expense::new("Lunch", 2.0, " ", date(2024, 1, 1)).is_err());
    }

    #[test]
    fn serializes_fields_in_file_order() {
        let expense = Expense::new("Bus pass", 42.5, "Transport", date(2024, 3, 1)).unwrap();
        let json = serde_json::to_string(&expense).unwrap();
        assert_eq!(
            json,
            r#"{"description":"Bus pass","amount":42.5,"category":"Transport","date":"2024-03-01"}"#
        );
    }

    #[test]
    fn stored_records_are_validated_and_dated() {
        let fallback = date(2024, 6, 1);

        let bad = r#"{"description":"","amount":3.0,"category":"Food","date":"2024-03-01"}"#;
        let stored: StoredExpense = serde_json::from_str(bad).unwrap();
        assert!(stored.into_expense(fallback).is_err());

        let good = r#"{"description":"Tea","amount":3,"category":"Food","date":"2024-03-01"}"#;
        let expense = serde_json::from_str::<StoredExpense>(good)
            .unwrap()
            .into_expense(fallback)
            .unwrap();
        assert_eq!(expense.amount(), 3.0);
        assert_eq!(expense.date(), date(2024, 3, 1));

        let undated = r#"{"description":"Old","amount":5.0,"category":"Food"}"#;
        let stored: StoredExpense = serde_json::from_str(undated).unwrap();
        assert!(!stored.has_date());
        assert_eq!(stored.into_expense(fallback).unwrap().date(), fallback);
    }

    #[test]
    fn text_fields_are_kept_verbatim() {
        let expense = Expense::new(" Lunch ", 4.0, "Food ", date(2024, 2, 1)).unwrap();
        assert_eq!(expense.description(), " Lunch ");
        assert_eq!(expense.category(), "Food ");
    }

    #[test]
    fn label_matches_list_format() {
        let expense = Expense::new("Lunch", 10.0, "Food", date(2024, 2, 1)).unwrap();
        assert_eq!(expense.label("£"), "2024-02-01 - Lunch: £10.00 (Food)");
        assert_eq!(expense.to_string(), "2024-02-01 - Lunch: 10.00 (Food)");
    }
}
