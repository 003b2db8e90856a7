//! Structural extraction from SQL text.
//!
//! [`extract_tables`] and [`extract_references`] are independent pure
//! functions over the same token stream. The `*_from_scan` variants let the
//! checker tokenize a document once and feed both.

mod references;
mod tables;

use crate::scanner::scan;
use crate::types::{ColumnReference, Dialect, TableSchema};

pub(crate) use references::references_from_scan;
pub(crate) use tables::tables_from_scan;

/// Extracts `CREATE TABLE` definitions: lower-cased table name -> declared columns.
pub fn extract_tables(sql: &str, dialect: Dialect) -> TableSchema {
    tables_from_scan(&scan(sql, dialect))
}

/// Extracts every `alias.column` reference inside `CREATE ... SEMANTIC VIEW` blocks,
/// in document order.
pub fn extract_references(sql: &str, dialect: Dialect) -> Vec<ColumnReference> {
    references_from_scan(&scan(sql, dialect))
}
