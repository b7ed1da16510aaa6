use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Linkage, RecordKind, TypeNode};

/// A single declaration extracted from the translation unit.
///
/// Serialized with `kind` as the tag so consumers can dispatch on it
/// without inspecting the remaining fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclarationRecord {
    Function(FunctionRecord),
    Variable(VariableRecord),
    Struct(CompositeRecord),
    Union(CompositeRecord),
    Enum(EnumRecord),
    Typedef(TypedefRecord),
    Macro(MacroRecord),
    /// Diagnostic fallback for node kinds without a dedicated record.
    Unrecognized(UnrecognizedRecord),
}

impl DeclarationRecord {
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Function(_) => RecordKind::Function,
            Self::Variable(_) => RecordKind::Variable,
            Self::Struct(_) => RecordKind::Struct,
            Self::Union(_) => RecordKind::Union,
            Self::Enum(_) => RecordKind::Enum,
            Self::Typedef(_) => RecordKind::Typedef,
            Self::Macro(_) => RecordKind::Macro,
            Self::Unrecognized(_) => RecordKind::Unrecognized,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Function(record) => &record.name,
            Self::Variable(record) => &record.name,
            Self::Struct(record) | Self::Union(record) => &record.name,
            Self::Enum(record) => &record.name,
            Self::Typedef(record) => &record.name,
            Self::Macro(record) => &record.name,
            Self::Unrecognized(record) => &record.name,
        }
    }
}

/// A function declaration or definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FunctionRecord {
    pub name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub ty: TypeNode,
    /// Parameter spellings in order; `None` for unnamed parameters.
    pub argument_names: Vec<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkage: Option<Linkage>,
}

/// A variable declaration (global, `extern`, or file-local).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VariableRecord {
    pub name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub ty: TypeNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkage: Option<Linkage>,
}

/// Struct or union layout. The variant of [`DeclarationRecord`] tells which.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CompositeRecord {
    /// Empty for anonymous structs and unions.
    pub name: String,
    pub fields: Vec<FieldRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeNode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EnumRecord {
    pub name: String,
    pub values: Vec<EnumValue>,
}

/// One enumerator with its resolved value and type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
    #[serde(rename = "type")]
    pub ty: TypeNode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TypedefRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeNode,
}

/// An object-like or function-like macro definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MacroRecord {
    pub name: String,
    /// Present only when the body is non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<MacroValue>,
}

/// The literal a macro body was classified as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum MacroValue {
    Integer(i64),
    Real(f64),
    /// Raw token text that is neither an integer nor a real literal.
    String(String),
}

impl MacroValue {
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }
}

/// A node the visitor has no dedicated record for, kept for visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UnrecognizedRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeNode,
    /// Human-readable node kind reported by the oracle.
    pub detail: String,
}
