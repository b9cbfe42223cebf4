use crate::cli::commands::usage_error;
use crate::cli::core::CommandResult;
use crate::cli::formatters::{distribution_lines, report_lines};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::reports::{distribution_shares, ReportKind};

const REPORT_USAGE: &str = "report <weekly|monthly|yearly>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "report",
            "Summarize this week, month, or year",
            REPORT_USAGE,
            cmd_report,
        ),
        CommandEntry::new(
            "distribution",
            "Show how many expenses fall in each category",
            "distribution",
            cmd_distribution,
        ),
    ]
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage_error(REPORT_USAGE));
    };
    let kind: ReportKind = raw.parse()?;
    let session = context.require_session()?;
    let report = session.report(kind, &*context.clock);

    output_section(format!("{} Report", kind.label()));
    for line in report_lines(&report, context.currency_symbol()) {
        io::print_info(line);
    }
    Ok(())
}

fn cmd_distribution(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let counts = context.require_session()?.distribution();
    if counts.is_empty() {
        io::print_info("No expenses to chart.");
        return Ok(());
    }
    output_section("Expense Distribution by Category");
    for line in distribution_lines(&distribution_shares(&counts)) {
        io::print_info(line);
    }
    Ok(())
}
