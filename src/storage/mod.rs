//! On-disk layout and JSON persistence helpers shared by the store and the directory.

pub mod json_backend;

use std::path::{Path, PathBuf};

use crate::errors::{ExpenseError, Result};

pub use json_backend::{ensure_dir, read_json, write_json};

const EXPENSES_DIR: &str = "expenses";
const USERS_DIR: &str = "users";
const USERS_FILE: &str = "users.json";
const EXPENSE_FILE_SUFFIX: &str = "_expenses.json";

/// Resolved directories for per-user expense files and the shared users file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub expenses_dir: PathBuf,
    pub users_dir: PathBuf,
}

impl StoragePaths {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            expenses_dir: root.join(EXPENSES_DIR),
            users_dir: root.join(USERS_DIR),
        }
    }

    /// Creates both directories if they are missing.
    pub fn ensure(&self) -> Result<()> {
        ensure_dir(&self.expenses_dir)?;
        ensure_dir(&self.users_dir)?;
        Ok(())
    }

    pub fn users_file(&self) -> PathBuf {
        self.users_dir.join(USERS_FILE)
    }

    /// Path of `<username>_expenses.json`, rejecting names that would escape the directory.
    pub fn expense_file(&self, username: &str) -> Result<PathBuf> {
        validate_username(username)?;
        Ok(self
            .expenses_dir
            .join(format!("{}{}", username, EXPENSE_FILE_SUFFIX)))
    }
}

/// Checks that a username can be used as a file name component.
pub fn validate_username(username: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(ExpenseError::InvalidInput("username must not be empty".into()));
    }
    if username == "." || username == ".." {
        return Err(ExpenseError::InvalidInput(format!(
            "`{}` is not a valid username",
            username
        )));
    }
    if username
        .chars()
        .any(|ch| matches!(ch, '/' | '\\') || ch.is_control())
    {
        return Err(ExpenseError::InvalidInput(format!(
            "username `{}` contains path separators or control characters",
            username.escape_default()
        )));
    }
    Ok(())
}
