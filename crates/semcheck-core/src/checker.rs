use crate::extractors::{references_from_scan, tables_from_scan};
use crate::scanner::scan;
use crate::types::{issue_codes, CheckConfig, Issue, Report};
#[cfg(feature = "tracing")]
use tracing::{debug, info_span};

mod report;
mod resolution;
mod validation;

pub use report::ReportBuilder;
pub use resolution::AliasResolver;
pub use validation::{ReferenceValidator, Validation};

/// Main entry point: checks every semantic-view reference in `sql` against the
/// tables declared in the same text.
///
/// This never fails. Text the tokenizer cannot read is skipped to the end of
/// its line and reported as a `SCAN_INCOMPLETE` warning; checking continues
/// with the next line.
pub fn validate(sql: &str, config: &CheckConfig) -> Report {
    #[cfg(feature = "tracing")]
    let _span = info_span!("validate", bytes = sql.len(), dialect = ?config.dialect).entered();

    let scan = scan(sql, config.dialect);
    let schema = tables_from_scan(&scan);
    let references = references_from_scan(&scan);

    #[cfg(feature = "tracing")]
    debug!(
        tables = schema.len(),
        references = references.len(),
        "extraction finished"
    );

    let resolver = AliasResolver::new(&config.aliases);
    let validator = ReferenceValidator::new(&schema, &resolver, &config.pseudo_columns);
    let mut builder = ReportBuilder::new(&schema);

    for reference in &references {
        builder.record(reference, validator.validate(reference));
    }

    for error in scan.errors() {
        builder.push_issue(
            Issue::warning(
                issue_codes::SCAN_INCOMPLETE,
                format!("Skipped unreadable SQL to end of line: {}", error.message),
            )
            .with_span(error.span),
        );
    }

    builder.build()
}
