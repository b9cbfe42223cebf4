//! Shared runtime state for CLI interactions and command execution.

use std::path::PathBuf;

use dialoguer::theme::ColorfulTheme;

use crate::{
    accounts::AccountDirectory,
    config::{Config, ConfigManager},
    core::Session,
    errors::ExpenseError,
    storage::StoragePaths,
    utils::clock::{Clock, SystemClock},
};

use super::{commands, core::CliError, io as cli_io, registry::CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub paths: StoragePaths,
    pub directory: AccountDirectory,
    pub session: Option<Session>,
    pub clock: Box<dyn Clock>,
    pub running: bool,
}

impl ShellContext {
    /// Builds a context in the application home (`EXPENSE_CORE_HOME` or `~/.expense_core`).
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::new()?, Box::new(SystemClock))
    }

    /// Builds a context rooted at `home`, which holds `config/` and, unless overridden, `data/`.
    pub fn with_home(
        mode: CliMode,
        home: PathBuf,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::with_base_dir(home)?, clock)
    }

    fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CliError> {
        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err @ ExpenseError::Config(_)) => {
                cli_io::print_error(&err);
                cli_io::print_warning("Using default preferences for this run.");
                Config::default()
            }
            Err(err) => return Err(err.into()),
        };
        let paths = StoragePaths::new(config.resolve_data_root(config_manager.home()));
        paths.ensure()?;
        let directory = match AccountDirectory::load(paths.users_file()) {
            Ok(directory) => directory,
            Err(err @ ExpenseError::Parse { .. }) => {
                cli_io::print_error(&err);
                cli_io::print_warning(
                    "No accounts are available and registration is disabled until it is fixed.",
                );
                AccountDirectory::locked(paths.users_file())
            }
            Err(err) => return Err(err.into()),
        };

        let mut registry = CommandRegistry::new();
        for entry in commands::all_definitions() {
            registry.register(entry);
        }

        Ok(Self {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            paths,
            directory,
            session: None,
            clock,
            running: true,
        })
    }
}
