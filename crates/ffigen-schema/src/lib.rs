//! # ffigen-schema
//!
//! JSON Schema generation and validation for ffigen output.
//!
//! The wire types are defined in `ffigen-core` with `#[derive(JsonSchema)]`.
//! This crate builds their schemas, validates arbitrary JSON against them,
//! and backs the `ffigen schema` and `ffigen check` commands.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::{DOCUMENT, SchemaRegistry, check_document};
