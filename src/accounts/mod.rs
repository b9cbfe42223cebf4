//! Shared username to password directory used by the login gate.

pub mod directory;

pub use directory::{AccountDirectory, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};
