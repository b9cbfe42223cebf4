//! Dispatch, error reporting, and session helpers for the shell context.

use std::io;

use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::{core::Session, errors::ExpenseError};

use super::io as cli_io;
use super::registry::CommandEntry;
use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Not logged in. Use `login <username>` first.")]
    NotLoggedIn,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] ExpenseError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// User-facing shell error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ExpenseError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl ShellContext {
    pub fn prompt(&self) -> String {
        match &self.session {
            Some(session) => format!("expense[{}]> ", session.username()),
            None => "expense> ".to_string(),
        }
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(self.confirm("Exit shell?")?)
    }

    /// Asks a yes/no question; script mode always proceeds.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_info("Use `help <command>` for usage details.");
            }
            CommandError::NotLoggedIn => {
                cli_io::print_error(CommandError::NotLoggedIn);
                cli_io::print_info("The default account is `admin` / `password123`.");
            }
            other => cli_io::print_error(other),
        }
    }

    pub(crate) fn require_session(&self) -> Result<&Session, CommandError> {
        self.session.as_ref().ok_or(CommandError::NotLoggedIn)
    }

    pub(crate) fn require_session_mut(&mut self) -> Result<&mut Session, CommandError> {
        self.session.as_mut().ok_or(CommandError::NotLoggedIn)
    }

    pub(crate) fn currency_symbol(&self) -> &str {
        &self.config.currency_symbol
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    /// Saves unsaved expenses, then ends the session. The session is kept if saving fails.
    ///
    /// A store that replaced an unreadable file is only written after interactive confirmation.
    pub(crate) fn end_session(&mut self) -> CommandResult {
        let (dirty, recovered, path) = match &self.session {
            Some(session) => {
                let store = session.store();
                (store.is_dirty(), store.is_recovered(), store.path().to_path_buf())
            }
            None => return Ok(()),
        };

        let save = dirty
            && (!recovered
                || (self.mode == CliMode::Interactive
                    && self.confirm(&format!(
                        "`{}` could not be read. Overwrite it with the current expenses?",
                        path.display()
                    ))?));
        if save {
            let path = self.require_session_mut()?.store_mut().save()?;
            cli_io::print_success(format!("Expenses saved to {}.", path.display()));
        } else if dirty {
            cli_io::print_warning(format!(
                "Unsaved changes discarded; `{}` was left untouched. Use `save` to overwrite it.",
                path.display()
            ));
        }

        if let Some(session) = self.session.take() {
            session.close()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::shell::handle_line;
    use crate::utils::clock::FixedClock;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn script_context() -> (ShellContext, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
        let context =
            ShellContext::with_home(CliMode::Script, temp.path().to_path_buf(), Box::new(clock))
                .expect("shell context");
        (context, temp)
    }

    fn run(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
        handle_line(context, line)
    }

    #[test]
    fn expense_commands_require_login() {
        let (mut context, _guard) = script_context();
        let err = run(&mut context, "list").expect_err("not logged in");
        assert!(matches!(err, CommandError::NotLoggedIn));
    }

    #[test]
    fn wrong_password_is_reported() {
        let (mut context, _guard) = script_context();
        let err = run(&mut context, "login admin wrong").expect_err("bad password");
        assert!(matches!(
            err,
            CommandError::Core(ExpenseError::AuthenticationFailed)
        ));
        assert!(context.session.is_none());
    }

    #[test]
    fn add_edit_delete_flow_updates_store() {
        let (mut context, _guard) = script_context();
        run(&mut context, "login admin password123").unwrap();
        run(&mut context, "add \"Weekly shop\" 40 food").unwrap();
        run(&mut context, "add Bus 2.5 Transport 2024-02-01").unwrap();

        let store = context.session.as_ref().unwrap().store();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().category(), "Food");
        assert_eq!(
            store.get(0).unwrap().date(),
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
        );

        run(&mut context, "edit 2 Tram 3 Transport 2024-02-02").unwrap();
        let err = run(&mut context, "edit 3 Tram 3 Transport 2024-02-02").expect_err("no #3");
        assert!(matches!(
            err,
            CommandError::Core(ExpenseError::NotFound { index: 2, len: 2 })
        ));

        run(&mut context, "delete 1").unwrap();
        let store = context.session.as_ref().unwrap().store();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().description(), "Tram");
    }

    #[test]
    fn exit_saves_and_stops() {
        let (mut context, _guard) = script_context();
        run(&mut context, "login admin password123").unwrap();
        run(&mut context, "add Lunch 9.99").unwrap();
        let path = context.session.as_ref().unwrap().store().path().to_path_buf();

        let control = run(&mut context, "exit").unwrap();
        assert_eq!(control, LoopControl::Exit);
        assert!(!context.running);
        assert!(context.session.is_none());
        assert!(path.exists());
    }

    #[test]
    fn invalid_report_kind_is_an_error() {
        let (mut context, _guard) = script_context();
        run(&mut context, "login admin password123").unwrap();
        let err = run(&mut context, "report daily").expect_err("unknown kind");
        assert!(matches!(
            err,
            CommandError::Core(ExpenseError::InvalidReportKind(_))
        ));
    }

    #[test]
    fn unknown_commands_and_comments_continue() {
        let (mut context, _guard) = script_context();
        assert_eq!(run(&mut context, "lsit").unwrap(), LoopControl::Continue);
        assert_eq!(run(&mut context, "# a comment").unwrap(), LoopControl::Continue);
    }

    #[test]
    fn exit_does_not_overwrite_unreadable_expense_file() {
        let (mut context, _guard) = script_context();
        let path = context.paths.expense_file("admin").unwrap();
        std::fs::write(&path, "not json").unwrap();

        run(&mut context, "login admin password123").unwrap();
        assert!(context.session.as_ref().unwrap().store().is_recovered());
        run(&mut context, "add Tea 2 Food 2024-01-02").unwrap();
        assert_eq!(run(&mut context, "exit").unwrap(), LoopControl::Exit);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
    }

    #[test]
    fn explicit_save_replaces_unreadable_expense_file() {
        let (mut context, _guard) = script_context();
        let path = context.paths.expense_file("admin").unwrap();
        std::fs::write(&path, "not json").unwrap();

        run(&mut context, "login admin password123").unwrap();
        run(&mut context, "add Tea 2 Food 2024-01-02").unwrap();
        run(&mut context, "save").unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"description\": \"Tea\""));
    }

    #[test]
    fn login_remembers_last_user() {
        let (mut context, _guard) = script_context();
        run(&mut context, "register zoe pw").unwrap();
        run(&mut context, "login zoe pw").unwrap();
        let reloaded = context.config_manager.load().unwrap();
        assert_eq!(reloaded.last_user.as_deref(), Some("zoe"));
    }
}
