//! Extraction results and the validation report.

use super::common::{Issue, Severity, Span};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Declared tables: lower-cased table name -> column names in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableSchema {
    tables: IndexMap<String, Vec<String>>,
}

impl TableSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table. Redeclaring a table replaces its columns but keeps
    /// its original position.
    pub fn insert(&mut self, name: &str, columns: Vec<String>) {
        self.tables.insert(name.to_lowercase(), columns);
    }

    pub fn columns(&self, table: &str) -> Option<&[String]> {
        self.tables.get(table).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.tables
            .iter()
            .map(|(name, columns)| (name.as_str(), columns.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// An `alias.column` reference found inside a semantic view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColumnReference {
    /// Alias exactly as written.
    pub alias: String,
    /// Column exactly as written.
    pub column: String,
    /// Byte range from the alias start to the column end.
    pub span: Span,
}

impl ColumnReference {
    pub fn new(alias: impl Into<String>, column: impl Into<String>, span: Span) -> Self {
        Self {
            alias: alias.into(),
            column: column.into(),
            span,
        }
    }
}

/// Result of validating one reference against the declared tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationOutcome {
    /// Column exists with identical case.
    Ok,
    /// Column exists, but only under different letter-case.
    CaseMismatch { correction: String },
    /// Table exists but has no such column in any case.
    ColumnNotFound { table: String },
    /// Alias resolved to a table that was never declared.
    TableNotFound { table: String },
}

impl ValidationOutcome {
    /// Severity this outcome is reported with, if it is reported at all.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            Self::Ok => None,
            Self::CaseMismatch { .. } => Some(Severity::Error),
            Self::ColumnNotFound { .. } | Self::TableNotFound { .. } => Some(Severity::Warning),
        }
    }
}

/// A declared table and how many columns it has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub name: String,
    pub column_count: usize,
}

/// Tallies for a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Number of declared tables
    pub table_count: usize,
    /// References checked (pseudo-columns excluded)
    pub reference_count: usize,
    /// References skipped because they named a pseudo-column
    pub skipped_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
}

/// Outcome of validating one SQL document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Declared tables in declaration order
    pub tables: Vec<TableSummary>,
    /// Formatted error lines (case mismatches)
    pub errors: Vec<String>,
    /// Formatted warning lines (missing tables and columns)
    pub warnings: Vec<String>,
    /// Structured findings in reference order, including informational notes
    pub issues: Vec<Issue>,
    pub summary: ReportSummary,
}

impl Report {
    /// Validation passes when no errors were found; warnings are advisory.
    pub fn is_success(&self) -> bool {
        self.summary.error_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_schema_keeps_declaration_order() {
        let mut schema = TableSchema::new();
        schema.insert("Zeta", vec!["a".into()]);
        schema.insert("alpha", vec!["b".into()]);
        schema.insert("zeta", vec!["c".into(), "d".into()]);

        let names: Vec<_> = schema.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(schema.columns("zeta").unwrap().len(), 2);
    }

    #[test]
    fn test_outcome_severity() {
        assert_eq!(ValidationOutcome::Ok.severity(), None);
        assert_eq!(
            ValidationOutcome::CaseMismatch {
                correction: "Age_Group".into()
            }
            .severity(),
            Some(Severity::Error)
        );
        assert_eq!(
            ValidationOutcome::TableNotFound { table: "x".into() }.severity(),
            Some(Severity::Warning)
        );
    }

    #[test]
    fn test_outcome_serialization_is_tagged() {
        let outcome = ValidationOutcome::CaseMismatch {
            correction: "ROI".into(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "caseMismatch");
        assert_eq!(json["correction"], "ROI");
    }

    #[test]
    fn test_empty_report_is_success() {
        assert!(Report::default().is_success());
    }
}
