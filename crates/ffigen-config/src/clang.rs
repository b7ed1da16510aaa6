//! How headers are handed to libclang.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_language() -> String {
    "c".to_string()
}

const fn default_prelude() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClangConfig {
    /// Source language passed to clang as `-x <language>`.
    #[serde(default = "default_language")]
    pub language: String,

    /// Arguments placed before the ones given on the command line
    /// (include paths, defines, target flags).
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// Parse through the scratch translation unit that defines `size_t`
    /// and `ptrdiff_t` and includes the header.
    #[serde(default = "default_prelude")]
    pub prelude: bool,
}

impl Default for ClangConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            extra_args: Vec::new(),
            prelude: default_prelude(),
        }
    }
}

impl ClangConfig {
    /// Reject values clang cannot be invoked with.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` for an empty or whitespace
    /// `language`, or an empty entry in `extra_args`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.language.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "clang.language".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if let Some(index) = self.extra_args.iter().position(|arg| arg.is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: format!("clang.extra_args[{index}]"),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
