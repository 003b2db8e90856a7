//! Types for the semantic-view schema checker.
//!
//! Configuration goes in, a [`Report`] comes out. Intermediate extraction
//! results ([`TableSchema`], [`ColumnReference`]) are public so callers can
//! run the extractors on their own.

mod common;
mod config;
mod report;

pub use common::{issue_codes, Issue, Severity, Span};
pub use config::{AliasMap, CheckConfig, Dialect, PseudoColumnSet};
pub use report::{
    ColumnReference, Report, ReportSummary, TableSchema, TableSummary, ValidationOutcome,
};
