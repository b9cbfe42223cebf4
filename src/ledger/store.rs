use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::{
    errors::{ExpenseError, Result},
    storage::{self, StoragePaths},
    utils::clock::{Clock, SystemClock},
};

use super::expense::{Expense, StoredExpense};

/// Result of reading a user's expense file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { count: usize },
    /// No file existed yet; the store starts empty.
    NoPriorData,
}

/// Ordered expense records belonging to a single user, backed by `<username>_expenses.json`.
///
/// Records are addressed by position. Changes stay in memory until [`ExpenseStore::save`].
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    username: String,
    path: PathBuf,
    records: Vec<Expense>,
    dirty: bool,
    recovered: bool,
}

impl ExpenseStore {
    /// Opens the store for `username`, loading its file when present.
    ///
    /// A malformed file fails with [`ExpenseError::Parse`]; callers that want to carry on
    /// can fall back to [`ExpenseStore::recover`].
    pub fn open(paths: &StoragePaths, username: &str) -> Result<(Self, LoadOutcome)> {
        let mut store = Self::empty(paths, username)?;
        let outcome = store.load()?;
        Ok((store, outcome))
    }

    /// Creates an empty store for `username` without touching the disk.
    pub fn empty(paths: &StoragePaths, username: &str) -> Result<Self> {
        let path = paths.expense_file(username)?;
        Ok(Self {
            username: username.to_string(),
            path,
            records: Vec::new(),
            dirty: false,
            recovered: false,
        })
    }

    /// Empty store standing in for a file that could not be read.
    ///
    /// Callers should not write it back implicitly; see [`ExpenseStore::is_recovered`].
    pub fn recover(paths: &StoragePaths, username: &str) -> Result<Self> {
        let mut store = Self::empty(paths, username)?;
        store.recovered = true;
        warn!(user = %username, path = %store.path.display(), "expense file unreadable");
        Ok(store)
    }

    /// Replaces the in-memory records with the file contents. Undated records get today's date.
    pub fn load(&mut self) -> Result<LoadOutcome> {
        self.load_as_of(SystemClock.today())
    }

    /// Like [`ExpenseStore::load`], dating undated records `today`.
    pub fn load_as_of(&mut self, today: NaiveDate) -> Result<LoadOutcome> {
        let stored = match storage::read_json::<Vec<StoredExpense>>(&self.path) {
            Ok(stored) => stored,
            Err(ExpenseError::FileNotFound(path)) => {
                warn!(
                    user = %self.username,
                    path = %path.display(),
                    "no previous expense file, starting fresh"
                );
                self.records.clear();
                self.dirty = false;
                self.recovered = false;
                return Ok(LoadOutcome::NoPriorData);
            }
            Err(err) => return Err(err),
        };

        let undated = stored.iter().filter(|record| !record.has_date()).count();
        let records = stored
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                record.into_expense(today).map_err(|err| {
                    ExpenseError::parse(&self.path, format!("record {index}: {err}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let count = records.len();
        self.records = records;
        self.dirty = false;
        self.recovered = false;
        if undated > 0 {
            warn!(
                user = %self.username,
                undated,
                %today,
                "records without a date were given today's date"
            );
        }
        info!(user = %self.username, count, "loaded expenses");
        Ok(LoadOutcome::Loaded { count })
    }

    /// Writes every record to the user's file. On failure the records stay in memory unsaved.
    pub fn save(&mut self) -> Result<PathBuf> {
        if let Some(parent) = self.path.parent() {
            storage::ensure_dir(parent)?;
        }
        storage::write_json(&self.records, &self.path)?;
        self.dirty = false;
        self.recovered = false;
        info!(
            user = %self.username,
            count = self.records.len(),
            path = %self.path.display(),
            "saved expenses"
        );
        Ok(self.path.clone())
    }

    /// Appends a new record and returns its position.
    pub fn add(
        &mut self,
        description: &str,
        amount: f64,
        category: &str,
        date: NaiveDate,
    ) -> Result<usize> {
        let expense = Expense::new(description, amount, category, date)?;
        self.records.push(expense);
        self.dirty = true;
        let index = self.records.len() - 1;
        debug!(user = %self.username, index, "added expense");
        Ok(index)
    }

    /// Replaces the record at `index` with one built from the given fields.
    pub fn edit(
        &mut self,
        index: usize,
        description: &str,
        amount: f64,
        category: &str,
        date: NaiveDate,
    ) -> Result<()> {
        self.check_index(index)?;
        let expense = Expense::new(description, amount, category, date)?;
        self.records[index] = expense;
        self.dirty = true;
        debug!(user = %self.username, index, "edited expense");
        Ok(())
    }

    /// Removes and returns the record at `index`.
    pub fn delete(&mut self, index: usize) -> Result<Expense> {
        self.check_index(index)?;
        let removed = self.records.remove(index);
        self.dirty = true;
        debug!(user = %self.username, index, "deleted expense");
        Ok(removed)
    }

    pub fn get(&self, index: usize) -> Option<&Expense> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[Expense] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expense> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of every amount; zero when empty.
    pub fn total(&self) -> f64 {
        self.records.iter().map(Expense::amount).sum()
    }

    /// Records dated within `[start, end]` (both inclusive), in store order.
    pub fn records_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Expense> {
        self.records
            .iter()
            .filter(|expense| start <= expense.date() && expense.date() <= end)
            .collect()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// True when the store replaced an unreadable file and has not been saved since.
    pub fn is_recovered(&self) -> bool {
        self.recovered
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.records.len() {
            Ok(())
        } else {
            Err(ExpenseError::NotFound {
                index,
                len: self.records.len(),
            })
        }
    }
}
