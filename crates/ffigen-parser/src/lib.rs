//! # ffigen-parser
//!
//! Extraction of a C header's public surface into a [`ProgramDocument`].
//!
//! The translation unit is read through the [`AstOracle`] trait:
//! - [`ClangOracle`] reads a unit parsed by libclang (loaded at runtime)
//! - [`SyntheticTu`] is an in-memory unit built programmatically
//!
//! [`extract`] walks any oracle; [`extract_header`] drives the full
//! libclang pipeline for one header.
//!
//! [`ProgramDocument`]: ffigen_core::ProgramDocument

pub mod error;
pub mod extractor;
pub mod libclang;
pub mod macros;
pub mod oracle;
pub mod prelude;
pub mod render;
pub mod synthetic;

pub use error::ParserError;
pub use extractor::{Descend, Visit, assemble, extract, visit_node, walk};
pub use libclang::{ClangOracle, Diagnostic, DiagnosticSeverity, Session};
pub use macros::{classify_body, classify_macro};
pub use oracle::{Abi, AstOracle, LinkageKind, NodeKind, Token, TokenKind, TypeKind};
pub use prelude::{ExtractRequest, Extraction, ScratchUnit, extract_header, scratch_source};
pub use render::render;
pub use synthetic::{NodeId, NodeSpec, SyntheticTu, TypeId, TypeSpec};
