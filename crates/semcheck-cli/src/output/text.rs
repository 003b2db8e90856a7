//! Human-readable report formatting.

use super::FileReport;
use owo_colors::OwoColorize;
use semcheck_core::{Issue, Severity};
use std::fmt::Write;
use std::time::Duration;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct TableRow<'a> {
    #[tabled(rename = "Table")]
    name: &'a str,
    #[tabled(rename = "Columns")]
    columns: usize,
}

/// Format check results as human-readable text.
pub fn format_text(results: &[FileReport], colored: bool, elapsed: Duration) -> String {
    let mut out = String::new();

    let mut total_pass = 0usize;
    let mut total_fail = 0usize;
    let mut total_errors = 0usize;
    let mut total_warnings = 0usize;

    for file in results {
        if file.report.is_success() {
            total_pass += 1;
        } else {
            total_fail += 1;
        }
        total_errors += file.report.summary.error_count;
        total_warnings += file.report.summary.warning_count;

        write_file_section(&mut out, file, colored);
    }

    writeln!(out, "All Finished in {}!", format_elapsed(elapsed)).unwrap();
    writeln!(
        out,
        "  {} passed. {} failed. {} errors. {} warnings.",
        pass_str(total_pass, colored),
        fail_str(total_fail, colored),
        total_errors,
        total_warnings
    )
    .unwrap();

    out
}

fn write_file_section(out: &mut String, file: &FileReport, colored: bool) {
    let report = &file.report;
    let status = match (report.is_success(), colored) {
        (true, true) => "PASS".green().to_string(),
        (true, false) => "PASS".to_string(),
        (false, true) => "FAIL".red().to_string(),
        (false, false) => "FAIL".to_string(),
    };

    writeln!(out, "== [{}] {}", file.name, status).unwrap();

    if report.tables.is_empty() {
        writeln!(out, "No CREATE TABLE definitions found.").unwrap();
    } else {
        let rows = report.tables.iter().map(|table| TableRow {
            name: &table.name,
            columns: table.column_count,
        });
        writeln!(out, "{}", Table::new(rows).with(Style::sharp())).unwrap();
    }

    let summary = &report.summary;
    let stats = format!(
        "References: {} checked | {} skipped | {} errors | {} warnings",
        summary.reference_count, summary.skipped_count, summary.error_count, summary.warning_count
    );
    if colored {
        writeln!(out, "{}", stats.cyan()).unwrap();
    } else {
        writeln!(out, "{stats}").unwrap();
    }

    // Errors first, then warnings, then notes; reference order within each.
    for severity in [Severity::Error, Severity::Warning, Severity::Info] {
        for issue in report.issues.iter().filter(|i| i.severity == severity) {
            write_issue(out, file, issue, colored);
        }
    }

    writeln!(out).unwrap();
}

fn write_issue(out: &mut String, file: &FileReport, issue: &Issue, colored: bool) {
    let (line, col) = file.issue_position(issue);
    let code_str = if colored {
        match issue.severity {
            Severity::Error => issue.code.red().to_string(),
            Severity::Warning => issue.code.yellow().to_string(),
            Severity::Info => issue.code.blue().to_string(),
        }
    } else {
        issue.code.clone()
    };

    writeln!(
        out,
        "L:{:>4} | P:{:>4} | {} | {}",
        line, col, code_str, issue.message
    )
    .unwrap();
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs >= 1.0 {
        format!("{secs:.2}s")
    } else if elapsed.as_millis() >= 1 {
        format!("{}ms", elapsed.as_millis())
    } else {
        format!("{}us", elapsed.as_micros())
    }
}

fn pass_str(count: usize, colored: bool) -> String {
    let s = format!("{count} file{}", if count == 1 { "" } else { "s" });
    if colored && count > 0 {
        s.green().to_string()
    } else {
        s
    }
}

fn fail_str(count: usize, colored: bool) -> String {
    let s = format!("{count} file{}", if count == 1 { "" } else { "s" });
    if colored && count > 0 {
        s.red().to_string()
    } else {
        s
    }
}
