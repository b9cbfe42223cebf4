use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::{
    errors::{ExpenseError, Result},
    storage::{self, validate_username},
};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "password123";

/// Username to credential mapping persisted as a single JSON object.
///
/// Passwords are stored and compared as plaintext so that existing `users.json` files keep
/// working. This is not safe for real credentials.
#[derive(Debug, Clone)]
pub struct AccountDirectory {
    path: PathBuf,
    users: BTreeMap<String, String>,
    locked: bool,
}

impl AccountDirectory {
    /// Loads the directory from `path`, seeding the default admin account when no file exists.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let users = match storage::read_json::<BTreeMap<String, String>>(&path) {
            Ok(users) => {
                info!(count = users.len(), "loaded account directory");
                users
            }
            Err(ExpenseError::FileNotFound(_)) => {
                info!("no users file, using default admin account");
                Self::default_users()
            }
            Err(err) => return Err(err),
        };
        Ok(Self {
            path,
            users,
            locked: false,
        })
    }

    /// An empty directory that never writes to `path`, for when that file could not be read.
    pub fn locked(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            users: BTreeMap::new(),
            locked: true,
        }
    }

    fn default_users() -> BTreeMap<String, String> {
        let mut users = BTreeMap::new();
        users.insert(
            DEFAULT_ADMIN_USERNAME.to_string(),
            DEFAULT_ADMIN_PASSWORD.to_string(),
        );
        users
    }

    /// True only when `username` exists and its stored password matches exactly.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        let ok = self
            .users
            .get(username)
            .is_some_and(|stored| stored == password);
        if !ok {
            warn!(user = %username, "authentication failed");
        }
        ok
    }

    /// Adds a new account and persists the directory immediately.
    ///
    /// If writing fails the new entry is removed again so memory matches disk.
    pub fn register(&mut self, username: &str, password: &str) -> Result<()> {
        if self.locked {
            return Err(ExpenseError::DirectoryLocked(self.path.clone()));
        }
        if username.is_empty() || password.is_empty() {
            return Err(ExpenseError::InvalidInput(
                "username and password are both required".into(),
            ));
        }
        validate_username(username)?;
        if self.users.contains_key(username) {
            return Err(ExpenseError::UsernameTaken(username.to_string()));
        }

        self.users.insert(username.to_string(), password.to_string());
        if let Err(err) = self.save() {
            self.users.remove(username);
            return Err(err);
        }
        info!(user = %username, "registered account");
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if self.locked {
            return Err(ExpenseError::DirectoryLocked(self.path.clone()));
        }
        if let Some(parent) = self.path.parent() {
            storage::ensure_dir(parent)?;
        }
        storage::write_json(&self.users, &self.path)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// Registered usernames in sorted order.
    pub fn usernames(&self) -> Vec<&str> {
        self.users.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
