//! Cross-cutting error types for ffigen.
//!
//! Domain-specific errors (`ParserError`, `ConfigError`, `SchemaError`) are
//! defined in their respective crates. The CLI converges all of them through
//! `anyhow`.

use thiserror::Error;

/// Errors raised while encoding or decoding a program document.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
