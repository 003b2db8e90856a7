//! Output formatting modules.

pub mod json;
pub mod text;

pub use json::format_json;
pub use text::format_text;

use semcheck_core::{Issue, Report};

/// Per-file check result used by the formatters.
pub struct FileReport {
    pub name: String,
    pub sql: String,
    pub report: Report,
}

impl FileReport {
    /// 1-based line and column of an issue, `(1, 1)` when it has no span.
    pub fn issue_position(&self, issue: &Issue) -> (usize, usize) {
        issue
            .span
            .map(|span| offset_to_line_col(&self.sql, span.start))
            .unwrap_or((1, 1))
    }
}

/// 1-based line and column of a byte offset. Columns count characters;
/// offsets past the end clamp to the end and offsets inside a character round
/// down to its start.
pub fn offset_to_line_col(sql: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(sql.len());
    while !sql.is_char_boundary(end) {
        end -= 1;
    }
    let before = &sql[..end];

    let line_start = before.rfind('\n').map_or(0, |newline| newline + 1);
    let line = before.matches('\n').count() + 1;
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}
