//! Output formatting configuration.

use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Pretty-print the JSON document.
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Print compiler diagnostics to stderr after the document.
    #[serde(default = "default_true")]
    pub diagnostics: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            diagnostics: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = OutputConfig::default();
        assert!(config.pretty);
        assert!(config.diagnostics);
    }
}
