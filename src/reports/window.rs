use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{ExpenseError, Result};

/// The three standard reporting periods, each anchored on a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Weekly,
    Monthly,
    Yearly,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [ReportKind::Weekly, ReportKind::Monthly, ReportKind::Yearly];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Weekly => "weekly",
            ReportKind::Monthly => "monthly",
            ReportKind::Yearly => "yearly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Weekly => "Weekly",
            ReportKind::Monthly => "Monthly",
            ReportKind::Yearly => "Yearly",
        }
    }

    /// Computes the window containing `today`.
    pub fn window(&self, today: NaiveDate) -> DateWindow {
        match self {
            ReportKind::Weekly => {
                let start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
                DateWindow {
                    start,
                    end: start + Duration::days(6),
                }
            }
            ReportKind::Monthly => {
                let start = today - Duration::days(today.day0() as i64);
                DateWindow {
                    start,
                    end: last_day_of_month(start),
                }
            }
            ReportKind::Yearly => DateWindow {
                start: NaiveDate::from_yo_opt(today.year(), 1).unwrap_or(today),
                end: NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(NaiveDate::MAX),
            },
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = ExpenseError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(ReportKind::Weekly),
            "monthly" => Ok(ReportKind::Monthly),
            "yearly" => Ok(ReportKind::Yearly),
            _ => Err(ExpenseError::InvalidReportKind(value.to_string())),
        }
    }
}

/// Advances to the first of the next month and steps back one day.
fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Inclusive `[start, end]` date range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(ExpenseError::InvalidInput(format!(
                "window end {end} is before start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

pub fn report_window(kind: ReportKind, today: NaiveDate) -> DateWindow {
    kind.window(today)
}

/// String-keyed variant of [`report_window`]; unknown kinds fail with
/// [`ExpenseError::InvalidReportKind`].
pub fn report_window_for(kind: &str, today: NaiveDate) -> Result<DateWindow> {
    Ok(kind.parse::<ReportKind>()?.window(today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekly_window_spans_monday_to_sunday() {
        let mut day = date(2024, 1, 1);
        for _ in 0..21 {
            let window = ReportKind::Weekly.window(day);
            assert_eq!(window.days(), 7);
            assert_eq!(window.start.weekday(), Weekday::Mon);
            assert_eq!(window.end.weekday(), Weekday::Sun);
            assert!(window.contains(day));
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn weekly_window_crosses_year_boundary() {
        let window = ReportKind::Weekly.window(date(2025, 1, 1));
        assert_eq!(window.start, date(2024, 12, 30));
        assert_eq!(window.end, date(2025, 1, 5));
    }

    #[test]
    fn monthly_window_ends_on_true_last_day() {
        let cases = [
            (date(2023, 1, 17), date(2023, 1, 31)),
            (date(2023, 2, 10), date(2023, 2, 28)),
            (date(2024, 2, 10), date(2024, 2, 29)),
            (date(2024, 4, 30), date(2024, 4, 30)),
            (date(2024, 12, 5), date(2024, 12, 31)),
        ];
        for (today, last) in cases {
            let window = ReportKind::Monthly.window(today);
            assert_eq!(window.start, date(today.year(), today.month(), 1));
            assert_eq!(window.end, last, "month of {today}");
        }
    }

    #[test]
    fn yearly_window_covers_calendar_year() {
        let window = ReportKind::Yearly.window(date(2024, 7, 4));
        assert_eq!(window.start, date(2024, 1, 1));
        assert_eq!(window.end, date(2024, 12, 31));
        assert_eq!(window.days(), 366);
    }

    #[test]
    fn parse_kind_is_case_insensitive_and_rejects_unknown() {
        assert_eq!(" Monthly ".parse::<ReportKind>().unwrap(), ReportKind::Monthly);
        let err = report_window_for("daily", date(2024, 1, 1)).expect_err("unknown kind");
        assert!(matches!(err, ExpenseError::InvalidReportKind(ref kind) if kind == "daily"));
    }

    #[test]
    fn window_new_rejects_inverted_range() {
        assert!(DateWindow::new(date(2024, 2, 2), date(2024, 2, 1)).is_err());
        let single = DateWindow::new(date(2024, 2, 1), date(2024, 2, 1)).unwrap();
        assert_eq!(single.days(), 1);
    }
}
