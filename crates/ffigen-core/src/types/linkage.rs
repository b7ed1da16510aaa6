use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Linkage of a function or variable, when it is not ordinary external
/// linkage. External linkage is encoded by leaving the field out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Linkage {
    /// Internal linkage (`static` at file scope).
    Static,
    /// Unique-external linkage (entities in anonymous namespaces).
    Anonymous,
    /// No linkage, or linkage the oracle could not determine.
    Unknown,
}

impl std::fmt::Display for Linkage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Static => "static",
            Self::Anonymous => "anonymous",
            Self::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}
