//! # ffigen-core
//!
//! Schema types describing the public surface of a C header.
//!
//! This crate provides the foundational types shared across all ffigen crates:
//! - `TypeNode`: a rendered C type (pointer, array, function, reference,
//!   primitive, unknown) with its qualifiers
//! - `DeclarationRecord`: one extracted declaration (function, variable,
//!   struct, union, enum, typedef, macro, or an unrecognized construct)
//! - `SymbolIdentity`: the stable cross-TU identity used as the document key
//! - `ProgramDocument`: the identity-keyed output document
//! - Cross-cutting error types

pub mod document;
pub mod errors;
pub mod identity;
pub mod types;

pub use document::ProgramDocument;
pub use errors::CoreError;
pub use identity::SymbolIdentity;
pub use types::{
    CallingConvention, CompositeRecord, DeclarationRecord, EnumRecord, EnumValue, FieldRecord,
    FunctionRecord, Linkage, MacroRecord, MacroValue, Qualifiers, RecordKind, TypeNode,
    TypeShape, TypedefRecord, UnrecognizedRecord, VariableRecord,
};
