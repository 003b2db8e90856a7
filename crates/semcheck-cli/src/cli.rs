//! CLI argument parsing using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// semcheck - semantic view schema checker
#[derive(Parser, Debug)]
#[command(name = "semcheck")]
#[command(
    about = "Check semantic-view column references against CREATE TABLE definitions",
    long_about = None
)]
#[command(version)]
pub struct Args {
    /// SQL files to check; `-` or no files reads stdin
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// SQL dialect used to tokenize the input [default: snowflake, or the config file's]
    #[arg(short, long, value_enum)]
    pub dialect: Option<DialectArg>,

    /// JSON configuration file (aliases, pseudo-columns, dialect)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Alias mapping in ALIAS=TABLE format (can be repeated)
    #[arg(long = "alias", value_name = "ALIAS=TABLE")]
    pub aliases: Vec<String>,

    /// Additional computed metric name to skip (can be repeated)
    #[arg(long = "pseudo-column", value_name = "NAME")]
    pub pseudo_columns: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "text", value_enum)]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Compact JSON output (no pretty-printing)
    #[arg(long)]
    pub compact: bool,

    /// Suppress warnings on stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the JSON Schema of the configuration file and exit
    #[arg(long)]
    pub print_config_schema: bool,
}

/// SQL dialect options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialectArg {
    Generic,
    Ansi,
    Bigquery,
    Databricks,
    Duckdb,
    Mysql,
    Postgres,
    Redshift,
    Snowflake,
}

impl From<DialectArg> for semcheck_core::Dialect {
    fn from(d: DialectArg) -> Self {
        match d {
            DialectArg::Generic => semcheck_core::Dialect::Generic,
            DialectArg::Ansi => semcheck_core::Dialect::Ansi,
            DialectArg::Bigquery => semcheck_core::Dialect::Bigquery,
            DialectArg::Databricks => semcheck_core::Dialect::Databricks,
            DialectArg::Duckdb => semcheck_core::Dialect::Duckdb,
            DialectArg::Mysql => semcheck_core::Dialect::Mysql,
            DialectArg::Postgres => semcheck_core::Dialect::Postgres,
            DialectArg::Redshift => semcheck_core::Dialect::Redshift,
            DialectArg::Snowflake => semcheck_core::Dialect::Snowflake,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_conversion() {
        let dialect: semcheck_core::Dialect = DialectArg::Postgres.into();
        assert_eq!(dialect, semcheck_core::Dialect::Postgres);
    }

    #[test]
    fn test_parse_minimal_args() {
        let args = Args::parse_from(["semcheck", "view.sql"]);
        assert_eq!(args.files.len(), 1);
        assert_eq!(args.dialect, None);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.config.is_none());
        assert!(args.aliases.is_empty());
        assert!(!args.print_config_schema);
    }

    #[test]
    fn test_parse_full_args() {
        let args = Args::parse_from([
            "semcheck",
            "-d",
            "duckdb",
            "-f",
            "json",
            "-c",
            "semcheck.json",
            "-o",
            "report.json",
            "--alias",
            "perf=campaign_performance",
            "--alias",
            "ads=ad_spend",
            "--pseudo-column",
            "net_revenue",
            "--quiet",
            "--compact",
            "tables.sql",
            "view.sql",
        ]);
        assert_eq!(args.dialect, Some(DialectArg::Duckdb));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.config.unwrap().to_str().unwrap(), "semcheck.json");
        assert_eq!(args.output.unwrap().to_str().unwrap(), "report.json");
        assert_eq!(
            args.aliases,
            vec!["perf=campaign_performance", "ads=ad_spend"]
        );
        assert_eq!(args.pseudo_columns, vec!["net_revenue"]);
        assert!(args.quiet);
        assert!(args.compact);
        assert_eq!(args.files.len(), 2);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = Args::try_parse_from(["semcheck", "-f", "mermaid", "view.sql"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_print_config_schema_flag() {
        let args = Args::parse_from(["semcheck", "--print-config-schema"]);
        assert!(args.print_config_schema);
        assert!(args.files.is_empty());
    }
}
