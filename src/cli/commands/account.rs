use crate::cli::commands::usage_error;
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{CliMode, ShellContext};
use crate::core::Session;
use crate::errors::ExpenseError;
use crate::ledger::LoadOutcome;

const LOGIN_USAGE: &str = "login <username> [password]";
const REGISTER_USAGE: &str = "register <username> [password]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("login", "Log in and load your expenses", LOGIN_USAGE, cmd_login),
        CommandEntry::new("register", "Create a new account", REGISTER_USAGE, cmd_register),
        CommandEntry::new(
            "logout",
            "Save pending changes and log out",
            "logout",
            cmd_logout,
        ),
        CommandEntry::new("whoami", "Show the logged-in user", "whoami", cmd_whoami),
    ]
}

/// Takes the password from the arguments, or prompts for it interactively.
fn credentials(
    context: &ShellContext,
    args: &[&str],
    usage: &str,
) -> Result<(String, String), CommandError> {
    match args {
        [username, password] => Ok((username.to_string(), password.to_string())),
        [username] if context.mode == CliMode::Interactive => {
            let password = io::prompt_password(&context.theme, "Password")?;
            Ok((username.to_string(), password))
        }
        _ => Err(usage_error(usage)),
    }
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(session) = &context.session {
        return Err(CommandError::InvalidArguments(format!(
            "already logged in as `{}`; use `logout` first",
            session.username()
        )));
    }
    let (username, password) = credentials(context, args, LOGIN_USAGE)?;

    let session = match Session::login(&context.directory, &context.paths, &username, &password) {
        Ok((session, outcome)) => {
            match outcome {
                LoadOutcome::Loaded { count } => io::print_success(format!(
                    "Logged in as `{}` ({} expense{} loaded).",
                    username,
                    count,
                    if count == 1 { "" } else { "s" }
                )),
                LoadOutcome::NoPriorData => {
                    io::print_success(format!("Logged in as `{}`.", username));
                    io::print_warning("No previous expense file found, starting fresh.");
                }
            }
            session
        }
        Err(err @ ExpenseError::Parse { .. }) => {
            io::print_error(&err);
            io::print_warning(
                "Starting with an empty list. The file is left as is unless you run `save`.",
            );
            Session::login_fresh(&context.directory, &context.paths, &username, &password)?
        }
        Err(err) => return Err(err.into()),
    };

    context.session = Some(session);
    context.config.last_user = Some(username);
    context.persist_config()
}

fn cmd_register(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (username, password) = credentials(context, args, REGISTER_USAGE)?;
    context.directory.register(&username, &password)?;
    io::print_success("Registration successful. You can now log in with your new account.");
    Ok(())
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let username = context.require_session()?.username().to_string();
    context.end_session()?;
    io::print_success(format!("Logged out `{}`.", username));
    Ok(())
}

fn cmd_whoami(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = context.require_session()?;
    let store = session.store();
    io::print_info(format!(
        "{} ({} expenses{})",
        session.username(),
        store.len(),
        if store.is_dirty() { ", unsaved changes" } else { "" }
    ));
    Ok(())
}
