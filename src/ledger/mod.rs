//! Expense records, the suggested category set, and the per-user record store.

pub mod category;
pub mod expense;
pub mod store;

pub use category::{DEFAULT_CATEGORY, SUGGESTED_CATEGORIES};
pub use expense::{Expense, StoredExpense};
pub use store::{ExpenseStore, LoadOutcome};
