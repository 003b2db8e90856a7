//! Fuzz target for the semantic-view checker.
//!
//! `validate()` must never panic, whatever the input text or configuration.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use semcheck_core::{validate, AliasMap, CheckConfig, Dialect, PseudoColumnSet};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    sql: String,
    dialect_idx: u8,
    aliases: Vec<(String, String)>,
    metrics: Vec<String>,
}

impl FuzzInput {
    fn dialect(&self) -> Dialect {
        match self.dialect_idx % 5 {
            0 => Dialect::Generic,
            1 => Dialect::Postgres,
            2 => Dialect::Snowflake,
            3 => Dialect::Bigquery,
            _ => Dialect::Duckdb,
        }
    }

    fn config(&self) -> CheckConfig {
        let mut pseudo_columns = PseudoColumnSet::default();
        for metric in &self.metrics {
            pseudo_columns.add_metric(metric.clone());
        }
        let aliases = if self.aliases.is_empty() {
            AliasMap::default()
        } else {
            self.aliases.iter().cloned().collect()
        };
        CheckConfig {
            dialect: self.dialect(),
            aliases,
            pseudo_columns,
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    let config = input.config();
    let report = validate(&input.sql, &config);

    assert_eq!(report.summary.error_count, report.errors.len());
    assert_eq!(report.summary.warning_count, report.warnings.len());
    for issue in &report.issues {
        if let Some(span) = issue.span {
            assert!(span.start <= span.end && span.end <= input.sql.len());
        }
    }
});
