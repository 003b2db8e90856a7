use super::resolution::AliasResolver;
use crate::types::{ColumnReference, PseudoColumnSet, TableSchema, ValidationOutcome};
#[cfg(feature = "tracing")]
use tracing::trace;

/// A reference together with the table it resolved to and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub table: String,
    pub outcome: ValidationOutcome,
}

/// Classifies references against the declared tables.
pub struct ReferenceValidator<'a> {
    schema: &'a TableSchema,
    resolver: &'a AliasResolver,
    pseudo_columns: &'a PseudoColumnSet,
}

impl<'a> ReferenceValidator<'a> {
    pub fn new(
        schema: &'a TableSchema,
        resolver: &'a AliasResolver,
        pseudo_columns: &'a PseudoColumnSet,
    ) -> Self {
        Self {
            schema,
            resolver,
            pseudo_columns,
        }
    }

    /// Validates one reference. Returns `None` when the column names a
    /// pseudo-column, which is never checked and never counted.
    pub fn validate(&self, reference: &ColumnReference) -> Option<Validation> {
        if self.pseudo_columns.contains(&reference.column) {
            return None;
        }

        let table = self.resolver.resolve(&reference.alias);
        let outcome = match self.schema.columns(&table) {
            None => ValidationOutcome::TableNotFound {
                table: table.clone(),
            },
            Some(columns) => classify_column(&reference.column, columns, &table),
        };

        #[cfg(feature = "tracing")]
        trace!(
            alias = %reference.alias,
            column = %reference.column,
            table = %table,
            outcome = ?outcome,
            "validated reference"
        );

        Some(Validation { table, outcome })
    }
}

fn classify_column(column: &str, columns: &[String], table: &str) -> ValidationOutcome {
    if columns.iter().any(|c| c == column) {
        return ValidationOutcome::Ok;
    }

    // First match in declared order wins when several columns differ only by case.
    let lowered = column.to_lowercase();
    match columns.iter().find(|c| c.to_lowercase() == lowered) {
        Some(correction) => ValidationOutcome::CaseMismatch {
            correction: correction.clone(),
        },
        None => ValidationOutcome::ColumnNotFound {
            table: table.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AliasMap, Span};

    fn schema() -> TableSchema {
        let mut schema = TableSchema::new();
        schema.insert(
            "creative_metadata",
            vec!["creative_id".into(), "Sentiment_Score".into()],
        );
        schema.insert(
            "campaign_performance",
            vec!["performance_id".into(), "ROI".into(), "roi".into()],
        );
        schema.insert("dup_case", vec!["Mixed_Name".into(), "MIXED_NAME".into()]);
        schema
    }

    fn check(alias: &str, column: &str) -> Option<Validation> {
        let schema = schema();
        let resolver = AliasResolver::new(&AliasMap::default());
        let pseudo = PseudoColumnSet::default();
        let validator = ReferenceValidator::new(&schema, &resolver, &pseudo);
        validator.validate(&ColumnReference::new(alias, column, Span::new(0, 0)))
    }

    fn outcome(alias: &str, column: &str) -> ValidationOutcome {
        check(alias, column).expect("not a pseudo-column").outcome
    }

    #[test]
    fn exact_case_is_ok() {
        assert_eq!(outcome("creatives", "Sentiment_Score"), ValidationOutcome::Ok);
        assert_eq!(outcome("creatives", "creative_id"), ValidationOutcome::Ok);
    }

    #[test]
    fn case_mismatch_carries_correction() {
        assert_eq!(
            outcome("creatives", "sentiment_score"),
            ValidationOutcome::CaseMismatch {
                correction: "Sentiment_Score".into()
            }
        );
    }

    #[test]
    fn exact_match_beats_case_insensitive_match() {
        assert_eq!(outcome("performance", "roi"), ValidationOutcome::Ok);
        assert_eq!(outcome("performance", "ROI"), ValidationOutcome::Ok);
    }

    #[test]
    fn first_declared_column_wins_tie_break() {
        assert_eq!(
            outcome("dup_case", "mixed_name"),
            ValidationOutcome::CaseMismatch {
                correction: "Mixed_Name".into()
            }
        );
    }

    #[test]
    fn unknown_column() {
        assert_eq!(
            outcome("performance", "nonexistent_col"),
            ValidationOutcome::ColumnNotFound {
                table: "campaign_performance".into()
            }
        );
    }

    #[test]
    fn unknown_table() {
        let validation = check("unknownalias", "anything").unwrap();
        assert_eq!(validation.table, "unknownalias");
        assert_eq!(
            validation.outcome,
            ValidationOutcome::TableNotFound {
                table: "unknownalias".into()
            }
        );
    }

    #[test]
    fn alias_equal_to_table_name_resolves_directly() {
        assert_eq!(
            outcome("Creative_Metadata", "creative_id"),
            ValidationOutcome::Ok
        );
    }

    #[test]
    fn pseudo_columns_are_skipped() {
        assert!(check("performance", "AVG").is_none());
        assert!(check("performance", "count").is_none());
        assert!(check("segments", "total_segments").is_none());
        assert!(check("unknownalias", "Average_ROI").is_none());
    }
}
