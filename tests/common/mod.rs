#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use expense_core::{accounts::AccountDirectory, storage::StoragePaths};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Returns a fresh directory that outlives the calling test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Storage layout and account directory backed by a unique directory.
pub fn setup_test_env() -> (StoragePaths, AccountDirectory) {
    let paths = StoragePaths::new(temp_home());
    paths.ensure().expect("create storage dirs");
    let directory = AccountDirectory::load(paths.users_file()).expect("load account directory");
    (paths, directory)
}
