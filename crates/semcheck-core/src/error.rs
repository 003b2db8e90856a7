//! Error types for configuration handling.
//!
//! # Error Handling Strategy
//!
//! Checking a document never fails: missing tables, unknown aliases and
//! mismatched columns are findings collected in a [`crate::Report`], and a
//! lexical error only skips the rest of its line (reported as a warning
//! [`crate::Issue`]). The only fallible surface is configuration, which
//! returns [`ConfigError`].

use thiserror::Error;

/// Errors raised while building a [`crate::CheckConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document is not valid JSON or has the wrong shape.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// An alias override was not written as `ALIAS=TABLE`.
    #[error("alias mapping '{0}' must have the form ALIAS=TABLE")]
    MalformedAssignment(String),

    /// A configured name is not a plain SQL identifier.
    #[error("invalid {kind} name '{value}'")]
    InvalidIdentifier { kind: &'static str, value: String },
}
