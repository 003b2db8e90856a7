//! Schema-consistency checker for SQL semantic views.
//!
//! Given SQL text with `CREATE TABLE` definitions and `CREATE SEMANTIC VIEW`
//! blocks, [`validate`] recovers each table's columns, collects every
//! `alias.column` reference made inside the semantic views, resolves aliases
//! through a configurable mapping, and reports references whose column only
//! exists under a different letter-case (errors) or does not exist at all
//! (warnings).

pub mod checker;
pub mod error;
pub mod extractors;
mod scanner;
pub mod types;

// Re-export main types and functions
pub use checker::{validate, AliasResolver, ReferenceValidator, ReportBuilder, Validation};
pub use error::ConfigError;
pub use extractors::{extract_references, extract_tables};

pub use types::{
    issue_codes, AliasMap, CheckConfig, ColumnReference, Dialect, Issue, PseudoColumnSet, Report,
    ReportSummary, Severity, Span, TableSchema, TableSummary, ValidationOutcome,
};
