use std::path::PathBuf;

use crate::cli::commands::{parse_amount, parse_date, parse_position, usage_error};
use crate::cli::core::CommandResult;
use crate::cli::formatters::{expense_table, format_money};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::errors::ExpenseError;
use crate::ledger::{category, SUGGESTED_CATEGORIES};
use crate::reports::{summarize, DateWindow};

const ADD_USAGE: &str = "add <description> <amount> [category] [date]";
const EDIT_USAGE: &str = "edit <number> <description> <amount> <category> <date>";
const DELETE_USAGE: &str = "delete <number>";
const RANGE_USAGE: &str = "range <start YYYY-MM-DD> <end YYYY-MM-DD>";
const EXPORT_USAGE: &str = "export <file.csv>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record a new expense", ADD_USAGE, cmd_add),
        CommandEntry::new("edit", "Replace an existing expense", EDIT_USAGE, cmd_edit),
        CommandEntry::new("delete", "Remove an expense", DELETE_USAGE, cmd_delete),
        CommandEntry::new("list", "List all expenses", "list", cmd_list),
        CommandEntry::new("total", "Show the total of all expenses", "total", cmd_total),
        CommandEntry::new(
            "range",
            "List expenses between two dates (inclusive)",
            RANGE_USAGE,
            cmd_range,
        ),
        CommandEntry::new(
            "categories",
            "Show the suggested categories",
            "categories",
            cmd_categories,
        ),
        CommandEntry::new("save", "Write expenses to disk", "save", cmd_save),
        CommandEntry::new("export", "Export expenses as CSV", EXPORT_USAGE, cmd_export),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 || args.len() > 4 {
        return Err(usage_error(ADD_USAGE));
    }
    let today = context.clock.today();
    let amount = parse_amount(args[1], context.currency_symbol())?;
    let category = args
        .get(2)
        .map(|raw| category::normalize(raw))
        .unwrap_or_else(|| context.config.default_category.clone());
    let date = match args.get(3) {
        Some(raw) => parse_date(raw, today)?,
        None => today,
    };

    let symbol = context.config.currency_symbol.clone();
    let store = context.require_session_mut()?.store_mut();
    let index = store.add(args[0], amount, &category, date)?;
    if let Some(expense) = store.get(index) {
        io::print_success(format!("Added #{}: {}", index + 1, expense.label(&symbol)));
    }
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 5 {
        return Err(usage_error(EDIT_USAGE));
    }
    let index = parse_position(args[0])?;
    let amount = parse_amount(args[2], context.currency_symbol())?;
    let category = category::normalize(args[3]);
    let date = parse_date(args[4], context.clock.today())?;

    // Surface a bad position before asking for confirmation.
    let len = context.require_session()?.store().len();
    if index >= len {
        return Err(ExpenseError::NotFound { index, len }.into());
    }
    if !context.confirm("Are you sure you want to edit this expense?")? {
        io::print_info("Edit cancelled.");
        return Ok(());
    }

    let symbol = context.config.currency_symbol.clone();
    let store = context.require_session_mut()?.store_mut();
    store.edit(index, args[1], amount, &category, date)?;
    if let Some(expense) = store.get(index) {
        io::print_success(format!("Updated #{}: {}", index + 1, expense.label(&symbol)));
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage_error(DELETE_USAGE));
    };
    let index = parse_position(raw)?;
    let symbol = context.config.currency_symbol.clone();

    let label = {
        let store = context.require_session()?.store();
        match store.get(index) {
            Some(expense) => expense.label(&symbol),
            None => {
                return Err(ExpenseError::NotFound {
                    index,
                    len: store.len(),
                }
                .into())
            }
        }
    };
    if !context.confirm(&format!("Delete `{}`?", label))? {
        io::print_info("Delete cancelled.");
        return Ok(());
    }

    let removed = context.require_session_mut()?.store_mut().delete(index)?;
    io::print_success(format!("Deleted: {}", removed.label(&symbol)));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let store = context.require_session()?.store();
    if store.is_empty() {
        io::print_info("No expenses recorded.");
        return Ok(());
    }
    for line in expense_table(store.iter().enumerate(), context.currency_symbol()) {
        io::print_info(line);
    }
    Ok(())
}

fn cmd_total(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let total = context.require_session()?.store().total();
    io::print_info(format!(
        "Total expenses: {}",
        format_money(context.currency_symbol(), total)
    ));
    Ok(())
}

fn cmd_range(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [start, end] = args else {
        return Err(usage_error(RANGE_USAGE));
    };
    let today = context.clock.today();
    let window = DateWindow::new(parse_date(start, today)?, parse_date(end, today)?)?;
    let symbol = context.currency_symbol();
    let store = context.require_session()?.store();

    let matching = store.records_in_range(window.start, window.end);
    if matching.is_empty() {
        io::print_info(format!("No expenses from {}.", window));
        return Ok(());
    }
    for expense in &matching {
        io::print_info(expense.label(symbol));
    }
    let summary = summarize(matching);
    io::print_info(format!(
        "Total from {}: {}",
        window,
        format_money(symbol, summary.total)
    ));
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    for name in SUGGESTED_CATEGORIES {
        let marker = if name == context.config.default_category {
            " (default)"
        } else {
            ""
        };
        io::print_info(format!("  {}{}", name, marker));
    }
    io::print_info("Other category names are accepted as typed.");
    Ok(())
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let path = context.require_session_mut()?.store_mut().save()?;
    io::print_success(format!("Expenses saved successfully to {}.", path.display()));
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage_error(EXPORT_USAGE));
    };
    let path = PathBuf::from(*raw);
    let rows = context.require_session()?.export(&path)?;
    io::print_success(format!(
        "Exported {} expense{} to {}.",
        rows,
        if rows == 1 { "" } else { "s" },
        path.display()
    ));
    Ok(())
}
