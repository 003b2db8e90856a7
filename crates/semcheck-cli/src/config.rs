//! Configuration loading from a JSON file plus command-line overrides.

use anyhow::{Context, Result};
use semcheck_core::{AliasMap, CheckConfig};
use std::path::Path;

use crate::cli::Args;

/// Builds the effective configuration for a run.
///
/// Priority, lowest first:
/// 1. Built-in defaults
/// 2. `--config` file (a present `aliases` object replaces the built-in map)
/// 3. `--dialect`, `--alias` and `--pseudo-column` flags
pub fn load_config(args: &Args) -> Result<CheckConfig> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => CheckConfig::default(),
    };

    if let Some(dialect) = args.dialect {
        config.dialect = dialect.into();
    }

    for raw in &args.aliases {
        let (alias, table) = AliasMap::parse_assignment(raw).context("Invalid --alias")?;
        config.aliases.insert(alias, table);
    }

    for name in &args.pseudo_columns {
        config.pseudo_columns.add_metric(name.trim());
    }

    config.validate().context("Invalid --pseudo-column")?;
    Ok(config)
}

/// Load configuration from a JSON file.
pub fn load_config_file(path: &Path) -> Result<CheckConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    CheckConfig::from_json_str(&content)
        .with_context(|| format!("Failed to load config file: {}", path.display()))
}

/// JSON Schema describing the configuration file.
pub fn config_schema(compact: bool) -> Result<String> {
    let schema = schemars::schema_for!(CheckConfig);
    let rendered = if compact {
        serde_json::to_string(&schema)
    } else {
        serde_json::to_string_pretty(&schema)
    };
    rendered.context("Failed to render config schema")
}
