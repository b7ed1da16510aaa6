use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::CallingConvention;
use crate::SymbolIdentity;

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

/// `const`/`volatile`/`restrict` flags. They attach to any type shape and are
/// only written out when set.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Qualifiers {
    #[serde(rename = "volatile", default, skip_serializing_if = "is_false")]
    pub is_volatile: bool,
    #[serde(rename = "const", default, skip_serializing_if = "is_false")]
    pub is_const: bool,
    #[serde(rename = "restrict", default, skip_serializing_if = "is_false")]
    pub is_restrict: bool,
}

impl Qualifiers {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            is_volatile: false,
            is_const: false,
            is_restrict: false,
        }
    }

    #[must_use]
    pub const fn constant() -> Self {
        Self {
            is_const: true,
            ..Self::none()
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.is_const || self.is_volatile || self.is_restrict)
    }
}

/// A rendered C type.
///
/// Named declarations (structs, unions, enums, typedefs) are never inlined:
/// they appear as [`TypeShape::Ref`] pointing at the declaration's identity,
/// which is what keeps self-referential types finite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TypeNode {
    #[serde(flatten)]
    pub qualifiers: Qualifiers,
    #[serde(flatten)]
    pub shape: TypeShape,
}

/// The kind-specific part of a [`TypeNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeShape {
    Pointer {
        pointee: Box<TypeNode>,
    },
    Array {
        element: Box<TypeNode>,
        length: u64,
    },
    Function {
        #[serde(rename = "return")]
        returns: Box<TypeNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        calling_convention: Option<CallingConvention>,
        arguments: Vec<TypeNode>,
    },
    Ref {
        id: SymbolIdentity,
    },
    Primitive {
        #[serde(rename = "primitive")]
        name: String,
    },
    Unknown {
        #[serde(rename = "clang_kind")]
        raw_kind_name: String,
    },
}

impl TypeNode {
    #[must_use]
    pub const fn new(shape: TypeShape) -> Self {
        Self {
            qualifiers: Qualifiers::none(),
            shape,
        }
    }

    #[must_use]
    pub const fn with_qualifiers(mut self, qualifiers: Qualifiers) -> Self {
        self.qualifiers = qualifiers;
        self
    }

    #[must_use]
    pub fn pointer(pointee: Self) -> Self {
        Self::new(TypeShape::Pointer {
            pointee: Box::new(pointee),
        })
    }

    #[must_use]
    pub fn array(element: Self, length: u64) -> Self {
        Self::new(TypeShape::Array {
            element: Box::new(element),
            length,
        })
    }

    #[must_use]
    pub fn function(
        returns: Self,
        calling_convention: Option<CallingConvention>,
        arguments: Vec<Self>,
    ) -> Self {
        Self::new(TypeShape::Function {
            returns: Box::new(returns),
            calling_convention,
            arguments,
        })
    }

    #[must_use]
    pub fn reference(id: impl Into<SymbolIdentity>) -> Self {
        Self::new(TypeShape::Ref { id: id.into() })
    }

    #[must_use]
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::new(TypeShape::Primitive { name: name.into() })
    }

    #[must_use]
    pub fn unknown(raw_kind_name: impl Into<String>) -> Self {
        Self::new(TypeShape::Unknown {
            raw_kind_name: raw_kind_name.into(),
        })
    }

    /// The identity this node refers to, if it is a reference.
    #[must_use]
    pub const fn referenced_identity(&self) -> Option<&SymbolIdentity> {
        match &self.shape {
            TypeShape::Ref { id } => Some(id),
            _ => None,
        }
    }
}
