//! Parser error types for ffigen-parser.

/// Errors that can occur while parsing a header and extracting from it.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("libclang is unavailable: {0}")]
    LibclangUnavailable(String),

    #[error("a libclang session is already open in this process")]
    SessionActive,

    #[error("Parse failed for {path}: {message}")]
    ParseFailed { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
