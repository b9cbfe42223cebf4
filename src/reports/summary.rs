use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::ledger::{Expense, ExpenseStore};

use super::window::{DateWindow, ReportKind};

/// Total spend plus per-category amounts. Categories are ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total: f64,
    pub by_category: BTreeMap<String, f64>,
}

pub fn summarize<'a, I>(records: I) -> Summary
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut summary = Summary::default();
    for expense in records {
        summary.total += expense.amount();
        *summary
            .by_category
            .entry(expense.category().to_string())
            .or_insert(0.0) += expense.amount();
    }
    summary
}

/// Number of records per category, independent of amounts.
pub fn category_distribution<'a, I>(records: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut counts = BTreeMap::new();
    for expense in records {
        *counts.entry(expense.category().to_string()).or_insert(0) += 1;
    }
    counts
}

/// One slice of the category distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub count: usize,
    pub percent: f64,
}

/// Converts counts into percentage shares, largest first (ties by name).
pub fn distribution_shares(counts: &BTreeMap<String, usize>) -> Vec<CategoryShare> {
    let total: usize = counts.values().sum();
    let mut shares: Vec<CategoryShare> = counts
        .iter()
        .map(|(category, &count)| CategoryShare {
            category: category.clone(),
            count,
            percent: if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            },
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    shares
}

/// A summary over one reporting window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub kind: ReportKind,
    pub window: DateWindow,
    pub summary: Summary,
}

pub fn generate_report(store: &ExpenseStore, kind: ReportKind, today: NaiveDate) -> Report {
    let window = kind.window(today);
    let records = store.records_in_range(window.start, window.end);
    Report {
        kind,
        window,
        summary: summarize(records),
    }
}
