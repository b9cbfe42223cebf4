//! Text renderings of records and reports for the shell.

use crate::{
    ledger::Expense,
    reports::{CategoryShare, Report},
};

const BAR_WIDTH: usize = 30;

pub fn format_money(symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", symbol, amount)
}

/// Renders `(position, record)` pairs as aligned rows. Positions are shown 1-based.
pub fn expense_table<'a, I>(rows: I, symbol: &str) -> Vec<String>
where
    I: IntoIterator<Item = (usize, &'a Expense)>,
{
    let rows: Vec<(String, String, String, String, String)> = rows
        .into_iter()
        .map(|(index, expense)| {
            (
                (index + 1).to_string(),
                expense.date().format("%Y-%m-%d").to_string(),
                expense.description().to_string(),
                format_money(symbol, expense.amount()),
                expense.category().to_string(),
            )
        })
        .collect();
    if rows.is_empty() {
        return Vec::new();
    }

    let w_idx = column_width(rows.iter().map(|row| &row.0), "#");
    let w_desc = column_width(rows.iter().map(|row| &row.2), "Description");
    let w_amount = column_width(rows.iter().map(|row| &row.3), "Amount");

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format!(
        "{:>w_idx$}  {:<10}  {:<w_desc$}  {:>w_amount$}  Category",
        "#", "Date", "Description", "Amount"
    ));
    for (idx, date, desc, amount, category) in &rows {
        lines.push(format!(
            "{:>w_idx$}  {:<10}  {:<w_desc$}  {:>w_amount$}  {}",
            idx, date, desc, amount, category
        ));
    }
    lines
}

fn column_width<'a>(values: impl Iterator<Item = &'a String>, title: &str) -> usize {
    values
        .map(|value| value.chars().count())
        .chain(std::iter::once(title.len()))
        .max()
        .unwrap_or(0)
}

/// Report text: heading, period, total, and one line per category.
pub fn report_lines(report: &Report, symbol: &str) -> Vec<String> {
    let mut lines = vec![
        format!("From {} to {}", report.window.start, report.window.end),
        format!(
            "Total Expenses: {}",
            format_money(symbol, report.summary.total)
        ),
    ];
    if report.summary.by_category.is_empty() {
        lines.push("No expenses in this period.".to_string());
    } else {
        lines.push("Expenses by Category:".to_string());
        for (category, amount) in &report.summary.by_category {
            lines.push(format!("  {}: {}", category, format_money(symbol, *amount)));
        }
    }
    lines
}

/// Horizontal bar per category, scaled to the share of records.
pub fn distribution_lines(shares: &[CategoryShare]) -> Vec<String> {
    let width = shares
        .iter()
        .map(|share| share.category.chars().count())
        .max()
        .unwrap_or(0);
    shares
        .iter()
        .map(|share| {
            let filled = ((share.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
            format!(
                "{:<width$}  {:<bar$}  {:>5.1}% ({})",
                share.category,
                "#".repeat(filled.max(1)),
                share.percent,
                share.count,
                bar = BAR_WIDTH
            )
        })
        .collect()
}
