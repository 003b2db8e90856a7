use super::validation::Validation;
use crate::types::{
    issue_codes, ColumnReference, Issue, Report, ReportSummary, Severity, TableSchema,
    TableSummary, ValidationOutcome,
};

/// Reduces per-reference outcomes into a [`Report`].
///
/// Errors and warnings are kept in reference order; the summary counts are
/// derived from the lists so they always agree.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    tables: Vec<TableSummary>,
    errors: Vec<String>,
    warnings: Vec<String>,
    issues: Vec<Issue>,
    reference_count: usize,
    skipped_count: usize,
}

impl ReportBuilder {
    pub fn new(schema: &TableSchema) -> Self {
        Self {
            tables: schema
                .iter()
                .map(|(name, columns)| TableSummary {
                    name: name.to_string(),
                    column_count: columns.len(),
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Records the outcome for one reference; `None` marks a skipped pseudo-column.
    pub fn record(&mut self, reference: &ColumnReference, validation: Option<Validation>) {
        let Some(Validation { table, outcome }) = validation else {
            self.skipped_count += 1;
            return;
        };
        self.reference_count += 1;

        let Some(severity) = outcome.severity() else {
            return;
        };
        let alias = &reference.alias;
        let column = &reference.column;
        let (code, message, suggestion) = match outcome {
            ValidationOutcome::Ok => return,
            ValidationOutcome::CaseMismatch { correction } => (
                issue_codes::CASE_MISMATCH,
                format!("Case mismatch: {alias}.{column} should be {alias}.{correction}"),
                Some(correction),
            ),
            ValidationOutcome::ColumnNotFound { .. } => (
                issue_codes::COLUMN_NOT_FOUND,
                format!("Column not found: {alias}.{column} in table {table}"),
                None,
            ),
            ValidationOutcome::TableNotFound { .. } => (
                issue_codes::TABLE_NOT_FOUND,
                format!("Table not found: {table} for alias {alias}"),
                None,
            ),
        };

        let mut issue = Issue::new(severity, code, message)
            .with_span(reference.span)
            .with_reference(alias, column)
            .with_table(table);
        if let Some(correction) = suggestion {
            issue = issue.with_suggestion(correction);
        }
        self.push_issue(issue);
    }

    /// Adds an issue, listing its message under errors or warnings according to
    /// its severity. Info issues only appear in the issue list.
    pub fn push_issue(&mut self, issue: Issue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue.message.clone()),
            Severity::Warning => self.warnings.push(issue.message.clone()),
            Severity::Info => {}
        }
        self.issues.push(issue);
    }

    pub fn build(self) -> Report {
        let summary = ReportSummary {
            table_count: self.tables.len(),
            reference_count: self.reference_count,
            skipped_count: self.skipped_count,
            error_count: self.errors.len(),
            warning_count: self.warnings.len(),
        };

        Report {
            tables: self.tables,
            errors: self.errors,
            warnings: self.warnings,
            issues: self.issues,
            summary,
        }
    }
}
