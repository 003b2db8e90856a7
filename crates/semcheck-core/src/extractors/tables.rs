use crate::scanner::{matching_paren, object_name, skip_if_not_exists, Scan, ScanToken, TokenKind};
use crate::types::TableSchema;
#[cfg(feature = "tracing")]
use tracing::trace;

/// Words allowed between `CREATE [OR REPLACE]` and `TABLE`.
const TABLE_MODIFIERS: &[&str] = &[
    "TEMP",
    "TEMPORARY",
    "TRANSIENT",
    "VOLATILE",
    "LOCAL",
    "GLOBAL",
];

struct TableDefinition<'a> {
    name: &'a str,
    columns: Vec<String>,
    /// Token index right after the closing parenthesis.
    end: usize,
}

pub(crate) fn tables_from_scan(scan: &Scan) -> TableSchema {
    let tokens = scan.tokens();
    let mut schema = TableSchema::new();
    let mut idx = 0;

    while idx < tokens.len() {
        let Some(definition) = table_definition(tokens, idx) else {
            idx += 1;
            continue;
        };

        #[cfg(feature = "tracing")]
        trace!(
            table = definition.name,
            columns = definition.columns.len(),
            "found table definition"
        );

        if !definition.columns.is_empty() {
            schema.insert(definition.name, definition.columns);
        }
        idx = definition.end;
    }

    schema
}

/// Parses `CREATE [OR REPLACE] [modifiers] TABLE [IF NOT EXISTS] name ( ... )`
/// starting at `start`.
fn table_definition(tokens: &[ScanToken], start: usize) -> Option<TableDefinition<'_>> {
    if !tokens.get(start)?.is_keyword("CREATE") {
        return None;
    }

    let mut idx = skip_or_replace(tokens, start + 1);
    while tokens
        .get(idx)
        .is_some_and(|t| TABLE_MODIFIERS.iter().any(|m| t.is_keyword(m)))
    {
        idx += 1;
    }
    if !tokens.get(idx)?.is_keyword("TABLE") {
        return None;
    }

    idx = skip_if_not_exists(tokens, idx + 1);
    let (open, name) = object_name(tokens, idx)?;
    if !tokens.get(open)?.is(&TokenKind::LParen) {
        return None;
    }
    let close = matching_paren(tokens, open)?;

    let columns = split_elements(&tokens[open + 1..close])
        .into_iter()
        .filter_map(column_name)
        .collect();

    Some(TableDefinition {
        name,
        columns,
        end: close + 1,
    })
}

pub(super) fn skip_or_replace(tokens: &[ScanToken], idx: usize) -> usize {
    let or_replace = tokens.get(idx).is_some_and(|t| t.is_keyword("OR"))
        && tokens.get(idx + 1).is_some_and(|t| t.is_keyword("REPLACE"));
    if or_replace {
        idx + 2
    } else {
        idx
    }
}

/// Splits a table body at commas that are not nested in parentheses. Skipped
/// text also ends an element, since it may have swallowed the comma.
fn split_elements(body: &[ScanToken]) -> Vec<&[ScanToken]> {
    let mut elements = Vec::new();
    let mut depth = 0usize;
    let mut element_start = 0;

    for (idx, token) in body.iter().enumerate() {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => depth = depth.saturating_sub(1),
            TokenKind::Comma | TokenKind::Skipped if depth == 0 => {
                elements.push(&body[element_start..idx]);
                element_start = idx + 1;
            }
            _ => {}
        }
    }
    elements.push(&body[element_start..]);

    elements
}

/// Column name declared by one table element, or `None` for constraints and
/// empty elements.
fn column_name(element: &[ScanToken]) -> Option<String> {
    let first = element.first()?;
    if is_table_constraint(element) {
        return None;
    }
    first.word().map(str::to_string)
}

fn is_table_constraint(element: &[ScanToken]) -> bool {
    let Some(first) = element.first() else {
        return false;
    };
    let second = element.get(1);
    let second_is = |kind: &TokenKind| second.is_some_and(|t| t.is(kind));
    let second_is_keyword = |kw: &str| second.is_some_and(|t| t.is_keyword(kw));

    if first.is_keyword("CONSTRAINT") {
        true
    } else if first.is_keyword("PRIMARY") || first.is_keyword("FOREIGN") {
        second_is_keyword("KEY")
    } else if first.is_keyword("UNIQUE") {
        second_is(&TokenKind::LParen) || second_is_keyword("KEY") || second_is_keyword("INDEX")
    } else if first.is_keyword("CHECK") || first.is_keyword("KEY") {
        second_is(&TokenKind::LParen)
    } else if first.is_keyword("INDEX") {
        second_is(&TokenKind::LParen)
            || (second.is_some_and(ScanToken::is_unquoted_word)
                && element.get(2).is_some_and(|t| t.is(&TokenKind::LParen)))
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan;
    use crate::types::Dialect;

    fn tables(sql: &str) -> TableSchema {
        tables_from_scan(&scan(sql, Dialect::Snowflake))
    }

    fn columns<'a>(schema: &'a TableSchema, table: &str) -> Vec<&'a str> {
        schema
            .columns(table)
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn extracts_multiline_definition() {
        let schema = tables(
            "CREATE OR REPLACE TABLE creative_metadata (
                creative_id VARCHAR(50) PRIMARY KEY,
                image_url VARCHAR(500),
                Sentiment_Score FLOAT
            );",
        );
        assert_eq!(
            columns(&schema, "creative_metadata"),
            vec!["creative_id", "image_url", "Sentiment_Score"]
        );
    }

    #[test]
    fn extracts_single_line_definition() {
        let schema = tables(
            "CREATE OR REPLACE TABLE audience_demographics (audience_id VARCHAR, Age_Group VARCHAR);",
        );
        assert_eq!(
            columns(&schema, "audience_demographics"),
            vec!["audience_id", "Age_Group"]
        );
    }

    #[test]
    fn lowercases_table_name_only() {
        let schema = tables("create table Campaign_Performance (ROI FLOAT, CTR FLOAT)");
        assert_eq!(columns(&schema, "campaign_performance"), vec!["ROI", "CTR"]);
        assert!(schema.columns("Campaign_Performance").is_none());
    }

    #[test]
    fn skips_comments_and_constraints() {
        let schema = tables(
            "CREATE TABLE attribution_events (
                -- identifiers
                attribution_id VARCHAR(50),
                campaign_id VARCHAR(50), /* parent campaign */
                audience_id VARCHAR(50),
                CONSTRAINT pk_attr PRIMARY KEY (attribution_id),
                PRIMARY KEY (attribution_id),
                FOREIGN KEY (audience_id) REFERENCES audience_demographics(audience_id),
                UNIQUE (campaign_id, audience_id),
                CHECK (attribution_id <> '')
            );",
        );
        assert_eq!(
            columns(&schema, "attribution_events"),
            vec!["attribution_id", "campaign_id", "audience_id"]
        );
    }

    #[test]
    fn nested_parentheses_do_not_split_columns() {
        let schema = tables("CREATE TABLE t (cost NUMBER(10, 2) DEFAULT (0), ROI NUMBER(5,2))");
        assert_eq!(columns(&schema, "t"), vec!["cost", "ROI"]);
    }

    #[test]
    fn preserves_duplicate_columns() {
        let schema = tables("CREATE TABLE t (a INT, A INT, a INT)");
        assert_eq!(columns(&schema, "t"), vec!["a", "A", "a"]);
    }

    #[test]
    fn captures_all_tables_in_order() {
        let schema = tables(
            "CREATE TABLE b_table (x INT);
             CREATE TEMPORARY TABLE IF NOT EXISTS a_table (y INT);
             CREATE OR REPLACE TRANSIENT TABLE analytics.public.c_table (z INT);",
        );
        let names: Vec<_> = schema.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b_table", "a_table", "c_table"]);
    }

    #[test]
    fn redeclaration_replaces_columns_in_place() {
        let schema = tables(
            "CREATE TABLE t (old_col INT); CREATE TABLE u (x INT); CREATE OR REPLACE TABLE T (new_col INT);",
        );
        let names: Vec<_> = schema.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["t", "u"]);
        assert_eq!(columns(&schema, "t"), vec!["new_col"]);
    }

    #[test]
    fn quoted_column_names_keep_inner_text() {
        let schema = tables(r#"CREATE TABLE consent_privacy ("PII_flag" BOOLEAN, consent_id INT)"#);
        assert_eq!(columns(&schema, "consent_privacy"), vec!["PII_flag", "consent_id"]);
    }

    #[test]
    fn ignores_ctas_and_views() {
        let schema = tables(
            "CREATE TABLE copy AS SELECT * FROM t;
             CREATE VIEW v (a) AS SELECT 1;
             CREATE TABLE real_one (a INT);",
        );
        let names: Vec<_> = schema.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["real_one"]);
    }

    #[test]
    fn empty_or_unterminated_bodies_declare_nothing() {
        assert!(tables("CREATE TABLE empty ()").is_empty());
        assert!(tables("CREATE TABLE open_body (a INT, b INT").is_empty());
    }

    #[test]
    fn no_definitions_yield_empty_schema() {
        assert!(tables("SELECT 1; -- nothing here").is_empty());
        assert!(tables("").is_empty());
    }

    #[test]
    fn inline_index_is_not_a_column() {
        let schema = tables("CREATE TABLE t (a INT, INDEX idx_a (a), KEY (a))");
        assert_eq!(columns(&schema, "t"), vec!["a"]);
    }

    #[test]
    fn column_after_unreadable_line_is_kept() {
        let schema = tables(
            "CREATE TABLE creative_metadata (
    creative_id VARCHAR COMMENT 'creative's id',
    Sentiment_Score FLOAT
)",
        );
        assert_eq!(
            columns(&schema, "creative_metadata"),
            vec!["creative_id", "Sentiment_Score"]
        );
    }
}
