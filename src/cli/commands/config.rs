use crate::cli::commands::usage_error;
use crate::cli::core::CommandResult;
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

const CONFIG_USAGE: &str = "config [<key> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change preferences",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            for (key, value) in context.config.entries() {
                io::print_info(format!("  {:<17} {}", key, value));
            }
            io::print_info(format!("  file: {}", context.config_manager.path().display()));
            Ok(())
        }
        [key, value] => {
            context.config.set(key, value)?;
            context.persist_config()?;
            io::print_success(format!("Set {} = {}.", key, value));
            if *key == "data_dir" {
                io::print_info("The new data directory is used the next time the shell starts.");
            }
            Ok(())
        }
        _ => Err(usage_error(CONFIG_USAGE)),
    }
}
