//! Checker configuration: tokenizer dialect, alias mapping, and pseudo-columns.

use crate::error::ConfigError;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// SQL dialect used to tokenize the input.
///
/// Only lexical rules matter to the checker (identifier quoting, comment and
/// string syntax), so the statement grammar of the dialect is never applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Generic,
    Ansi,
    Bigquery,
    Databricks,
    Duckdb,
    Mysql,
    Postgres,
    Redshift,
    #[default]
    Snowflake,
}

impl Dialect {
    pub fn to_sqlparser_dialect(&self) -> Box<dyn sqlparser::dialect::Dialect> {
        use sqlparser::dialect::{
            AnsiDialect, BigQueryDialect, DatabricksDialect, DuckDbDialect, GenericDialect,
            MySqlDialect, PostgreSqlDialect, RedshiftSqlDialect, SnowflakeDialect,
        };
        match self {
            Self::Generic => Box::new(GenericDialect {}),
            Self::Ansi => Box::new(AnsiDialect {}),
            Self::Bigquery => Box::new(BigQueryDialect {}),
            Self::Databricks => Box::new(DatabricksDialect {}),
            Self::Duckdb => Box::new(DuckDbDialect {}),
            Self::Mysql => Box::new(MySqlDialect {}),
            Self::Postgres => Box::new(PostgreSqlDialect {}),
            Self::Redshift => Box::new(RedshiftSqlDialect {}),
            Self::Snowflake => Box::new(SnowflakeDialect {}),
        }
    }
}

/// Alias-to-table mapping used by semantic views.
///
/// Keys are matched case-insensitively; values are canonical table names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct AliasMap(BTreeMap<String, String>);

const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("demographics", "audience_demographics"),
    ("segments", "audience_segments"),
    ("creatives", "creative_metadata"),
    ("performance", "campaign_performance"),
    ("attribution", "attribution_events"),
    ("engagement", "media_channel_engagement"),
    ("consent", "consent_privacy"),
];

impl Default for AliasMap {
    fn default() -> Self {
        DEFAULT_ALIASES
            .iter()
            .map(|(alias, table)| (alias.to_string(), table.to_string()))
            .collect()
    }
}

impl FromIterator<(String, String)> for AliasMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = Self::empty();
        for (alias, table) in iter {
            map.insert(alias, table);
        }
        map
    }
}

impl AliasMap {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds or replaces a mapping. Both sides are stored lower-cased, matching
    /// how table names are keyed in the schema.
    pub fn insert(&mut self, alias: impl Into<String>, table: impl Into<String>) {
        self.0
            .insert(alias.into().to_lowercase(), table.into().to_lowercase());
    }

    /// Parses a command-line override of the form `ALIAS=TABLE`.
    pub fn parse_assignment(raw: &str) -> Result<(String, String), ConfigError> {
        let (alias, table) = raw
            .split_once('=')
            .ok_or_else(|| ConfigError::MalformedAssignment(raw.to_string()))?;
        let alias = alias.trim();
        let table = table.trim();
        validate_identifier("alias", alias)?;
        validate_identifier("table", table)?;
        Ok((alias.to_string(), table.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(a, t)| (a.as_str(), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Names that denote computed or aggregate values rather than physical columns.
///
/// Both lists are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PseudoColumnSet {
    /// Aggregate function names (`COUNT`, `SUM`, ...).
    #[serde(default = "default_aggregate_functions")]
    pub aggregate_functions: Vec<String>,

    /// Named metrics exposed by semantic views.
    #[serde(default = "default_computed_metrics")]
    pub computed_metrics: Vec<String>,
}

fn default_aggregate_functions() -> Vec<String> {
    ["COUNT", "SUM", "AVG", "MAX", "MIN"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_computed_metrics() -> Vec<String> {
    [
        "total_segments",
        "total_audiences",
        "lookalike_segments",
        "opt_in_audiences",
        "total_impressions",
        "total_clicks",
        "total_conversions",
        "total_cost",
        "average_roi",
        "average_ctr",
        "average_sentiment",
        "total_attribution_events",
        "average_attribution",
        "total_reach",
        "average_frequency",
        "average_engagement_rate",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for PseudoColumnSet {
    fn default() -> Self {
        Self {
            aggregate_functions: default_aggregate_functions(),
            computed_metrics: default_computed_metrics(),
        }
    }
}

impl PseudoColumnSet {
    pub fn empty() -> Self {
        Self {
            aggregate_functions: Vec::new(),
            computed_metrics: Vec::new(),
        }
    }

    /// Returns true if `column` names an aggregate or computed metric.
    pub fn contains(&self, column: &str) -> bool {
        self.aggregate_functions
            .iter()
            .chain(&self.computed_metrics)
            .any(|name| eq_ignore_case(name, column))
    }

    pub fn add_metric(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.computed_metrics.iter().any(|m| eq_ignore_case(m, &name)) {
            self.computed_metrics.push(name);
        }
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Full configuration for a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct CheckConfig {
    /// Tokenizer dialect (default: snowflake).
    #[serde(default)]
    pub dialect: Dialect,

    /// Alias-to-table mapping. When present it replaces the built-in mapping.
    #[serde(default)]
    pub aliases: AliasMap,

    /// Computed/aggregate names that are never validated.
    #[serde(default)]
    pub pseudo_columns: PseudoColumnSet,
}

impl CheckConfig {
    /// Parses a JSON configuration document. Omitted fields keep their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: CheckConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every configured name is a plain identifier.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (alias, table) in self.aliases.iter() {
            validate_identifier("alias", alias)?;
            validate_identifier("table", table)?;
        }
        for name in self
            .pseudo_columns
            .aggregate_functions
            .iter()
            .chain(&self.pseudo_columns.computed_metrics)
        {
            validate_identifier("pseudo-column", name)?;
        }
        Ok(())
    }
}

fn validate_identifier(kind: &'static str, value: &str) -> Result<(), ConfigError> {
    static IDENTIFIER_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = IDENTIFIER_REGEX
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_$]*$").expect("Invalid regex pattern"));

    if re.is_match(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier {
            kind,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_aliases() {
        let aliases = AliasMap::default();
        assert_eq!(aliases.len(), 7);
        assert!(aliases
            .iter()
            .any(|(a, t)| a == "creatives" && t == "creative_metadata"));
    }

    #[test]
    fn test_insert_lowercases_alias_and_table() {
        let mut aliases = AliasMap::empty();
        aliases.insert("PERF", "campaign_performance");
        aliases.insert("c", "Dim_Customer");
        assert_eq!(
            aliases.iter().collect::<Vec<_>>(),
            vec![("c", "dim_customer"), ("perf", "campaign_performance")]
        );
    }

    #[test]
    fn test_pseudo_columns_case_insensitive() {
        let pseudo = PseudoColumnSet::default();
        assert!(pseudo.contains("AVG"));
        assert!(pseudo.contains("avg"));
        assert!(pseudo.contains("Total_Segments"));
        assert!(!pseudo.contains("audience_id"));
    }

    #[test]
    fn test_add_metric_deduplicates() {
        let mut pseudo = PseudoColumnSet::empty();
        pseudo.add_metric("net_revenue");
        pseudo.add_metric("NET_REVENUE");
        assert_eq!(pseudo.computed_metrics, vec!["net_revenue"]);
    }

    #[test]
    fn test_parse_assignment() {
        let (alias, table) = AliasMap::parse_assignment("perf = campaign_performance").unwrap();
        assert_eq!(alias, "perf");
        assert_eq!(table, "campaign_performance");
    }

    #[test]
    fn test_parse_assignment_rejects_missing_equals() {
        let err = AliasMap::parse_assignment("perf").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedAssignment(_)));
    }

    #[test]
    fn test_parse_assignment_rejects_bad_identifier() {
        let err = AliasMap::parse_assignment("perf=campaign performance").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidIdentifier { kind: "table", .. }
        ));
    }

    #[test]
    fn test_config_deserialization_defaults() {
        let config = CheckConfig::from_json_str("{}").unwrap();
        assert_eq!(config, CheckConfig::default());
        assert_eq!(config.dialect, Dialect::Snowflake);
    }

    #[test]
    fn test_config_aliases_replace_defaults() {
        let config =
            CheckConfig::from_json_str(r#"{"aliases": {"orders": "fact_orders"}}"#).unwrap();
        assert_eq!(config.aliases.len(), 1);
        assert_eq!(config.pseudo_columns, PseudoColumnSet::default());
    }

    #[test]
    fn test_config_partial_pseudo_columns() {
        let config =
            CheckConfig::from_json_str(r#"{"pseudoColumns": {"computedMetrics": ["gmv"]}}"#)
                .unwrap();
        assert!(config.pseudo_columns.contains("GMV"));
        assert!(config.pseudo_columns.contains("count"));
        assert!(!config.pseudo_columns.contains("total_segments"));
    }

    #[test]
    fn test_config_rejects_invalid_json() {
        let err = CheckConfig::from_json_str("{aliases").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_config_rejects_bad_alias() {
        let err = CheckConfig::from_json_str(r#"{"aliases": {"": "orders"}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidIdentifier { kind: "alias", .. }
        ));
    }

    #[test]
    fn test_dialect_deserialization() {
        let config = CheckConfig::from_json_str(r#"{"dialect": "postgres"}"#).unwrap();
        assert_eq!(config.dialect, Dialect::Postgres);
    }
}
