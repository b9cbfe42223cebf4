//! Ties the login gate to a per-user store and exposes report helpers.

use std::{collections::BTreeMap, path::Path};

use tracing::{info, warn};

use crate::{
    accounts::AccountDirectory,
    errors::{ExpenseError, Result},
    export,
    ledger::{ExpenseStore, LoadOutcome},
    reports::{self, Report, ReportKind},
    storage::StoragePaths,
    utils::clock::Clock,
};

/// An authenticated user together with their open expense store.
#[derive(Debug)]
pub struct Session {
    store: ExpenseStore,
}

impl Session {
    /// Authenticates against `directory` and opens the user's store.
    ///
    /// A malformed expense file is returned as [`ExpenseError::Parse`]; use
    /// [`Session::login_fresh`] to continue with an empty store.
    pub fn login(
        directory: &AccountDirectory,
        paths: &StoragePaths,
        username: &str,
        password: &str,
    ) -> Result<(Self, LoadOutcome)> {
        Self::authenticate(directory, username, password)?;
        let (store, outcome) = ExpenseStore::open(paths, username)?;
        info!(user = %username, "session opened");
        Ok((Self { store }, outcome))
    }

    /// Authenticates and opens an empty store in place of an unreadable file.
    ///
    /// [`Session::close`] will not write such a store; only an explicit save replaces the file.
    pub fn login_fresh(
        directory: &AccountDirectory,
        paths: &StoragePaths,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        Self::authenticate(directory, username, password)?;
        let store = ExpenseStore::recover(paths, username)?;
        warn!(user = %username, "session opened with an empty store");
        Ok(Self { store })
    }

    fn authenticate(directory: &AccountDirectory, username: &str, password: &str) -> Result<()> {
        if directory.authenticate(username, password) {
            Ok(())
        } else {
            Err(ExpenseError::AuthenticationFailed)
        }
    }

    pub fn username(&self) -> &str {
        self.store.username()
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ExpenseStore {
        &mut self.store
    }

    pub fn report(&self, kind: ReportKind, clock: &dyn Clock) -> Report {
        reports::generate_report(&self.store, kind, clock.today())
    }

    pub fn distribution(&self) -> BTreeMap<String, usize> {
        reports::category_distribution(self.store.iter())
    }

    pub fn export(&self, path: &Path) -> Result<usize> {
        export::export_csv(self.store.iter(), path)
    }

    /// Saves pending changes and ends the session.
    ///
    /// A store opened over an unreadable file is left unsaved so the file stays intact.
    pub fn close(mut self) -> Result<()> {
        if self.store.is_recovered() {
            if self.store.is_dirty() {
                warn!(user = %self.store.username(), "discarding changes to recovered store");
            }
        } else if self.store.is_dirty() {
            self.store.save()?;
        }
        info!(user = %self.store.username(), "session closed");
        Ok(())
    }
}
