//! Human-readable rendering of reports and summaries
//!
//! Everything here returns a `String`; commands decide where it goes.

use colored::Colorize;
use docs_core::{BulkSummary, FileFailure, FixRegistry, FixSummary, Issue, Severity, ValidationReport};

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

fn issue_line(issue: &Issue) -> String {
    let severity = match issue.severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow().bold(),
    };
    let location = issue.line.map(|line| format!("line {line}: ")).unwrap_or_default();
    // Build output spans several lines; keep it under the issue.
    let message = issue.message.replace('\n', "\n        ");
    format!(
        "    {severity}: {location}{message} {}",
        format!("[{}]", issue.phase).dimmed()
    )
}

fn failure_lines(failures: &[FileFailure]) -> Vec<String> {
    let mut lines = Vec::new();
    if failures.is_empty() {
        return lines;
    }
    lines.push(format!("{}", "Failed:".red().bold()));
    for failure in failures {
        lines.push(format!("    {} {}", failure.path, failure.message.dimmed()));
    }
    lines
}

/// Validation report. Default mode lists documents with errors; verbose
/// lists every document.
pub fn validation_report(report: &ValidationReport, verbose: bool) -> String {
    let mut lines = Vec::new();

    for doc in &report.documents {
        let marker = if doc.has_errors() {
            "✗".red().bold()
        } else if !verbose {
            continue;
        } else if doc.warnings.is_empty() {
            "✓".green()
        } else {
            "!".yellow().bold()
        };
        lines.push(format!("{marker} {} ({})", doc.rel_path, doc.doc_type));
        for issue in doc.errors.iter().chain(&doc.warnings) {
            lines.push(issue_line(issue));
        }
    }

    if !report.run_issues.is_empty() {
        lines.push(format!("{}", "Run".bold()));
        for issue in &report.run_issues {
            lines.push(issue_line(issue));
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Scanned {}: {}, {}",
        plural(report.scanned, "document"),
        plural(report.error_count, "error"),
        plural(report.warning_count, "warning")
    ));
    lines.push(if report.has_errors() {
        format!("{}", "Validation failed".red().bold())
    } else {
        format!("{}", "All documents valid".green().bold())
    });
    lines.join("\n")
}

/// Per-file fix counts, optional diffs and failures.
pub fn fix_summary(summary: &FixSummary, verbose: bool) -> String {
    let mut lines = Vec::new();
    let verb = if summary.dry_run { "would fix" } else { "fixed" };

    for file in &summary.changed {
        lines.push(format!("{} {} ({verb} {})", "✓".green(), file.rel_path, plural(file.changes(), "change")));
        if verbose {
            for applied in &file.applied {
                lines.push(format!("    {:<20} {}", applied.name.cyan(), applied.changes));
            }
        }
        if let Some(diff) = &file.diff {
            lines.push(diff.trim_end().to_string());
        }
    }
    lines.extend(failure_lines(&summary.failures));

    if !lines.is_empty() {
        lines.push(String::new());
    }
    let mode = if summary.dry_run { " (dry run, nothing written)" } else { "" };
    lines.push(format!(
        "Processed {}: {} in {}{mode}",
        plural(summary.files_processed, "file"),
        plural(summary.total_changes(), "change"),
        plural(summary.changed.len(), "file")
    ));
    lines.join("\n")
}

pub fn bulk_summary(summary: &BulkSummary, verbose: bool) -> String {
    let mut lines = Vec::new();
    let verb = if summary.dry_run { "would update" } else { "updated" };
    for path in &summary.changed {
        lines.push(format!("{} {path} ({verb})", "✓".green()));
    }
    if verbose {
        for path in &summary.skipped {
            lines.push(format!("{} {path} (no frontmatter, skipped)", "-".dimmed()));
        }
    }
    lines.extend(failure_lines(&summary.failures));

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "{} changed, {} unchanged, {} skipped{}",
        summary.changed.len(),
        summary.unchanged,
        summary.skipped.len(),
        if summary.dry_run { " (dry run)" } else { "" }
    ));
    lines.join("\n")
}

pub fn fix_catalog(registry: &FixRegistry) -> String {
    let mut lines = vec![format!("{}", "Available Fixes".bold()), String::new()];
    for fix in registry.iter() {
        let note = if fix.included_in_all() { "" } else { " (not in `all`)" };
        lines.push(format!("  {:<22} {}{}", fix.name().green(), fix.description(), note.dimmed()));
    }
    lines.push(String::new());
    lines.push(format!(
        "{} {} fixes. Run {} to apply every fix marked for batches.",
        "Total:".dimmed(),
        registry.len(),
        "docs fix all".cyan()
    ));
    lines.join("\n")
}
