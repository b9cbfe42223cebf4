//! Line-oriented shell that drives the expense core.

pub mod commands;
pub mod core;
pub mod formatters;
mod help;
mod io;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;

pub use self::core::{CliError, CommandError, CommandResult};
pub use shell::run_cli;
pub use shell_context::{CliMode, ShellContext};
