use serde::{Deserialize, Serialize};

/// The kind of an extracted declaration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Function,
    Variable,
    Struct,
    Union,
    Enum,
    Typedef,
    Macro,
    Unrecognized,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Function => "function",
            Self::Variable => "variable",
            Self::Struct => "struct",
            Self::Union => "union",
            Self::Enum => "enum",
            Self::Typedef => "typedef",
            Self::Macro => "macro",
            Self::Unrecognized => "unrecognized",
        };
        write!(f, "{s}")
    }
}
