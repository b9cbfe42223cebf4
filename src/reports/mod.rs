//! Reporting windows and aggregation over expense records.

pub mod summary;
pub mod window;

pub use summary::{
    category_distribution, distribution_shares, generate_report, summarize, CategoryShare,
    Report, Summary,
};
pub use window::{report_window, report_window_for, DateWindow, ReportKind};
