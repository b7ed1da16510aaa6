//! Schema registry for the ffigen wire types.
//!
//! Schemas are built once from the `ffigen-core` types using
//! [`schemars::schema_for!`]; validation goes through `jsonschema`.

use std::collections::HashMap;

use ffigen_core::{DeclarationRecord, ProgramDocument, TypeNode};
use schemars::schema_for;

use crate::error::SchemaError;

/// Name of the whole-document schema.
pub const DOCUMENT: &str = "document";

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, schema_for!($ty).to_value());
    };
}

pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

impl SchemaRegistry {
    /// Build a registry holding the document, record, and type schemas.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();
        register!(schemas, DOCUMENT, ProgramDocument);
        register!(schemas, "declaration_record", DeclarationRecord);
        register!(schemas, "type_node", TypeNode);
        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown,
    /// `SchemaError::Generation` if the schema does not compile, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate `text` against the document schema and decode it.
///
/// # Errors
///
/// Returns `SchemaError::Decode` for malformed JSON or a value that cannot
/// be decoded, and `SchemaError::ValidationFailed` for schema violations.
pub fn check_document(
    registry: &SchemaRegistry,
    text: &str,
) -> Result<ProgramDocument, SchemaError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(ffigen_core::CoreError::from)?;
    registry.validate(DOCUMENT, &value)?;
    Ok(ProgramDocument::from_json(text)?)
}

#[cfg(test)]
mod tests {
    use ffigen_core::{CompositeRecord, FieldRecord, MacroRecord, MacroValue, Qualifiers};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new()
    }

    fn sample_document() -> ProgramDocument {
        let mut document = ProgramDocument::new();
        document.insert(
            "c:@S@node".into(),
            DeclarationRecord::Struct(CompositeRecord {
                name: "node".to_string(),
                fields: vec![FieldRecord {
                    name: "next".to_string(),
                    ty: TypeNode::pointer(TypeNode::reference("c:@S@node"))
                        .with_qualifiers(Qualifiers::constant()),
                }],
            }),
        );
        document.insert(
            "c:@macro@PI".into(),
            DeclarationRecord::Macro(MacroRecord {
                name: "PI".to_string(),
                value: Some(MacroValue::Real(2.5)),
            }),
        );
        document.insert(
            ffigen_core::SymbolIdentity::anonymous(),
            DeclarationRecord::Macro(MacroRecord {
                name: String::new(),
                value: None,
            }),
        );
        document
    }

    #[test]
    fn registry_lists_sorted_names() {
        let reg = registry();
        assert_eq!(reg.schema_count(), 3);
        assert_eq!(reg.list(), vec!["declaration_record", DOCUMENT, "type_node"]);
    }

    #[test]
    fn unknown_schema_is_not_found() {
        let result = registry().validate("nonexistent", &json!({}));
        assert!(matches!(result, Err(SchemaError::NotFound(_))));
    }

    #[test]
    fn extracted_document_validates() {
        let value = serde_json::to_value(sample_document()).expect("serialize");
        registry()
            .validate(DOCUMENT, &value)
            .expect("document should validate");
    }

    #[rstest]
    #[case(json!({"kind": "primitive", "primitive": "int"}))]
    #[case(json!({"const": true, "kind": "pointer", "pointee": {"kind": "ref", "id": "c:@S@a"}}))]
    #[case(json!({"kind": "array", "element": {"kind": "primitive", "primitive": "char"}, "length": 8}))]
    #[case(json!({"kind": "function", "return": {"kind": "primitive", "primitive": "void"}, "calling_convention": "stdcall", "arguments": []}))]
    #[case(json!({"kind": "unknown", "clang_kind": "Vector"}))]
    fn type_nodes_validate(#[case] node: serde_json::Value) {
        registry()
            .validate("type_node", &node)
            .expect("type node should validate");
    }

    #[rstest]
    #[case(json!({"kind": "primitive"}))]
    #[case(json!({"kind": "pointer"}))]
    #[case(json!({"kind": "array", "element": {"kind": "primitive", "primitive": "int"}, "length": -1}))]
    #[case(json!({"kind": "function", "return": {"kind": "primitive", "primitive": "int"}, "calling_convention": "vectorcall", "arguments": []}))]
    #[case(json!({"kind": "mystery"}))]
    fn malformed_type_nodes_fail(#[case] node: serde_json::Value) {
        let result = registry().validate("type_node", &node);
        assert!(
            matches!(result, Err(SchemaError::ValidationFailed { ref errors }) if !errors.is_empty()),
            "expected validation failure for {node}"
        );
    }

    #[test]
    fn document_without_anonymous_key_fails() {
        let result = registry().validate(DOCUMENT, &json!({}));
        assert!(matches!(result, Err(SchemaError::ValidationFailed { .. })));
    }

    #[test]
    fn check_document_decodes_valid_text() {
        let document = sample_document();
        let text = document.to_json(true).expect("encode");
        let decoded = check_document(&registry(), &text).expect("check passes");
        assert_eq!(decoded, document);
    }

    #[test]
    fn check_document_rejects_invalid_json() {
        let result = check_document(&registry(), "{not json");
        assert!(matches!(result, Err(SchemaError::Decode(_))));
    }
}
