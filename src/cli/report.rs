//! Cargo-style issue rendering.
//!
//! Kept apart from the analysis core so the crate stays usable as a library;
//! everything here works on the `Report` trait and writes to any `Write`.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, CommandSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};
use crate::utils::pluralize;

pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = gutter_width(&sorted);
    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }
    print_summary(&sorted, writer);
}

pub fn print_success(files_checked: usize) {
    print_success_to(files_checked, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(files_checked: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} - no issues found",
            pluralize(files_checked, "file", "files")
        )
        .green()
    );
}

// ============================================================
// Internal Functions
// ============================================================

fn severity_label(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
        Severity::Hint => "hint".bold().cyan(),
    }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity = issue.report_severity();
    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_label(severity),
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
        ReportLocation::Source(ctx) => {
            let line = ctx.location.line;
            let col = ctx.location.col;
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                ctx.location.file_path,
                line,
                col
            );

            let caret = match severity {
                Severity::Error => "^".red(),
                Severity::Warning => "^".yellow(),
                Severity::Hint => "-".cyan(),
            };

            let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = max_line_width);
            let _ = writeln!(
                writer,
                "{:>width$} {} {}",
                line.to_string().blue(),
                "|".blue(),
                ctx.source_line,
                width = max_line_width
            );

            // Underline the whole span, aligned by display width of the
            // text left of it.
            let prefix: String = ctx.source_line.chars().take(col.saturating_sub(1)).collect();
            let padding = UnicodeWidthStr::width(prefix.as_str());
            let span_chars: usize = ctx
                .source_line
                .chars()
                .skip(col.saturating_sub(1))
                .take(ctx.span_len as usize)
                .count()
                .max(1);
            let underline = caret.to_string().repeat(span_chars);
            let _ = writeln!(
                writer,
                "{:>width$} {} {:>padding$}{}",
                "",
                "|".blue(),
                "",
                underline,
                width = max_line_width,
                padding = padding
            );
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let errors = issues.iter().filter(|i| i.severity() == Severity::Error).count();
    let warnings = issues.iter().filter(|i| i.severity() == Severity::Warning).count();
    let hints = issues.iter().filter(|i| i.severity() == Severity::Hint).count();
    let total = errors + warnings + hints;
    if total == 0 {
        return;
    }

    let _ = writeln!(
        writer,
        "\n{} {} ({}, {}, {})",
        FAILURE_MARK.red(),
        pluralize(total, "problem", "problems"),
        pluralize(errors, "error", "errors").red(),
        pluralize(warnings, "warning", "warnings").yellow(),
        pluralize(hints, "hint", "hints").cyan()
    );
}

fn gutter_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.location.line),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

/// Entry point used by `run_cli` after a command finished.
pub fn print(result: &CommandResult) {
    match &result.summary {
        CommandSummary::Check => {
            if result.issues.is_empty() {
                print_success(result.files_checked);
            } else {
                report(&result.issues);
            }
        }
        CommandSummary::Init { created } => {
            if *created {
                println!(
                    "{} {} {}",
                    SUCCESS_MARK.green(),
                    "Created".green(),
                    CONFIG_FILE_NAME
                );
            }
        }
    }
}
