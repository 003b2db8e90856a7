//! JSON output formatting.

use super::FileReport;
use semcheck_core::Severity;

/// Format check results as a JSON array with one entry per file.
///
/// If `compact` is true, outputs minified JSON without whitespace.
pub fn format_json(results: &[FileReport], compact: bool) -> String {
    let json_results: Vec<serde_json::Value> = results
        .iter()
        .map(|file| {
            let report = &file.report;
            let issues: Vec<serde_json::Value> = report
                .issues
                .iter()
                .map(|issue| {
                    let (line, column) = file.issue_position(issue);
                    serde_json::json!({
                        "line": line,
                        "column": column,
                        "code": issue.code,
                        "message": issue.message,
                        "severity": match issue.severity {
                            Severity::Error => "error",
                            Severity::Warning => "warning",
                            Severity::Info => "info",
                        },
                        "alias": issue.alias,
                        "referencedColumn": issue.column,
                        "table": issue.table,
                        "suggestion": issue.suggestion,
                    })
                })
                .collect();

            serde_json::json!({
                "file": file.name,
                "success": report.is_success(),
                "summary": report.summary,
                "tables": report.tables,
                "errors": report.errors,
                "warnings": report.warnings,
                "issues": issues,
            })
        })
        .collect();

    if compact {
        serde_json::to_string(&json_results).unwrap_or_default()
    } else {
        serde_json::to_string_pretty(&json_results).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semcheck_core::{validate, CheckConfig};

    fn results() -> Vec<FileReport> {
        let sql = "CREATE TABLE creative_metadata (Sentiment_Score FLOAT);\n\
                   CREATE SEMANTIC VIEW v FACTS (creatives.sentiment_score AS s)";
        vec![FileReport {
            name: "view.sql".to_string(),
            sql: sql.to_string(),
            report: validate(sql, &CheckConfig::default()),
        }]
    }

    #[test]
    fn test_json_pretty() {
        let json = format_json(&results(), false);
        assert!(json.contains('\n'));

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let file = &parsed.as_array().unwrap()[0];
        assert_eq!(file["file"], "view.sql");
        assert_eq!(file["success"], false);
        assert_eq!(file["summary"]["errorCount"], 1);
        assert_eq!(file["tables"][0]["name"], "creative_metadata");
        assert_eq!(file["tables"][0]["columnCount"], 1);
        assert_eq!(file["issues"][0]["code"], "CASE_MISMATCH");
        assert_eq!(file["issues"][0]["severity"], "error");
        assert_eq!(file["issues"][0]["line"], 2);
        assert_eq!(file["issues"][0]["suggestion"], "Sentiment_Score");
        assert_eq!(
            file["errors"][0],
            "Case mismatch: creatives.sentiment_score should be creatives.Sentiment_Score"
        );
    }

    #[test]
    fn test_json_compact() {
        let json = format_json(&results(), true);
        assert!(!json.contains('\n'));
        assert!(json.starts_with("[{"));
    }
}
