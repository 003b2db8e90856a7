//! semcheck CLI - semantic view schema checker

use semcheck_cli::cli;
use semcheck_cli::config;
use semcheck_cli::input;
use semcheck_cli::output;

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use semcheck_core::validate;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use cli::{Args, OutputFormat};
use output::{format_json, format_text, FileReport};

/// Case mismatches found in at least one input.
const EXIT_FAILURE: u8 = 1;
/// Input or configuration error (missing file, bad config, malformed --alias).
const EXIT_CONFIG_ERROR: u8 = 66;

fn main() -> ExitCode {
    let args = Args::parse();

    if args.print_config_schema {
        return match print_config_schema(&args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("semcheck: error: {e:#}");
                ExitCode::from(EXIT_CONFIG_ERROR)
            }
        };
    }

    match run(args) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(EXIT_FAILURE)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("semcheck: error: {e:#}");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

fn print_config_schema(args: &Args) -> Result<()> {
    let schema = config::config_schema(args.compact)?;
    write_output(args.output.as_deref(), &schema)
}

/// Checks every input and writes the report. Returns true if any input has errors.
fn run(args: Args) -> Result<bool> {
    let started_at = Instant::now();

    let check_config = config::load_config(&args)?;
    let sources = input::read_input(&args.files)?;

    let results: Vec<FileReport> = sources
        .into_iter()
        .map(|source| {
            let report = validate(&source.content, &check_config);
            FileReport {
                name: source.name,
                sql: source.content,
                report,
            }
        })
        .collect();

    if !args.quiet {
        print_notices_to_stderr(&results);
    }

    let has_errors = results.iter().any(|file| !file.report.is_success());
    let colored = args.output.is_none() && io::stdout().is_terminal();

    let output_str = match args.format {
        OutputFormat::Json => format_json(&results, args.compact),
        OutputFormat::Text => format_text(&results, colored, started_at.elapsed()),
    };

    write_output(args.output.as_deref(), &output_str)?;

    Ok(has_errors)
}

/// Writes `content` to `path`, or to stdout when no path is given. Stdout
/// output always ends with a newline.
fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("Failed to write to {}", path.display())),
        None => {
            let newline = if content.ends_with('\n') { "" } else { "\n" };
            let mut stdout = io::stdout().lock();
            write!(stdout, "{content}{newline}")
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")
        }
    }
}

/// Reports inputs that cannot be meaningfully checked.
fn print_notices_to_stderr(results: &[FileReport]) {
    for file in results {
        let summary = &file.report.summary;
        if summary.table_count == 0 {
            eprintln!(
                "semcheck: warning: {}: no CREATE TABLE definitions found",
                file.name
            );
        }
        if summary.reference_count == 0 && summary.skipped_count == 0 {
            eprintln!(
                "semcheck: warning: {}: no semantic view references found",
                file.name
            );
        }
    }
}
