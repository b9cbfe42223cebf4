use std::path::PathBuf;

use thiserror::Error;

/// Error type that captures expense store, report, and account failures.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("No data file found at {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to parse `{}`: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid report kind `{0}` (expected weekly, monthly, or yearly)")]
    InvalidReportKind(String),
    #[error("Username `{0}` already exists")]
    UsernameTaken(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No expense at position {index} (store holds {len})")]
    NotFound { index: usize, len: usize },
    #[error("Incorrect username or password")]
    AuthenticationFailed,
    #[error("Accounts file `{}` is unreadable; registration is disabled", .0.display())]
    DirectoryLocked(PathBuf),
    #[error("Export failed: {0}")]
    Export(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ExpenseError>;

impl ExpenseError {
    pub(crate) fn parse(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        ExpenseError::Parse {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for ExpenseError {
    fn from(err: csv::Error) -> Self {
        ExpenseError::Export(err.to_string())
    }
}
