//! The identity-keyed output document.
//!
//! A `ProgramDocument` is the single accumulator of an extraction run. Named
//! records live in an insertion-ordered map keyed by [`SymbolIdentity`];
//! records without an identity are appended to one anonymous list. On the
//! wire the anonymous list sits under the reserved empty-string key, which is
//! always written first.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{CoreError, DeclarationRecord, SymbolIdentity};

/// Key under which identity-less records are serialized.
pub const ANONYMOUS_KEY: &str = "";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramDocument {
    entries: Vec<(SymbolIdentity, DeclarationRecord)>,
    positions: HashMap<SymbolIdentity, usize>,
    anonymous: Vec<DeclarationRecord>,
}

impl ProgramDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a record into the document.
    ///
    /// An empty identity appends to the anonymous list. Otherwise the record
    /// is stored under its identity; if the identity was already present the
    /// earlier record is replaced in place (keeping its key position) and
    /// returned.
    pub fn insert(
        &mut self,
        identity: SymbolIdentity,
        record: DeclarationRecord,
    ) -> Option<DeclarationRecord> {
        if identity.is_empty() {
            self.anonymous.push(record);
            return None;
        }

        if let Some(&position) = self.positions.get(&identity) {
            let slot = &mut self.entries[position].1;
            return Some(std::mem::replace(slot, record));
        }

        self.positions.insert(identity.clone(), self.entries.len());
        self.entries.push((identity, record));
        None
    }

    #[must_use]
    pub fn get(&self, identity: &str) -> Option<&DeclarationRecord> {
        let position = self.positions.get(identity)?;
        self.entries.get(*position).map(|(_, record)| record)
    }

    #[must_use]
    pub fn contains(&self, identity: &str) -> bool {
        self.positions.contains_key(identity)
    }

    /// Records with an identity, in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&SymbolIdentity, &DeclarationRecord)> {
        self.entries.iter().map(|(identity, record)| (identity, record))
    }

    /// Identities in first-insertion order.
    pub fn identities(&self) -> impl Iterator<Item = &SymbolIdentity> {
        self.entries.iter().map(|(identity, _)| identity)
    }

    /// Records without an identity, in discovery order.
    #[must_use]
    pub fn anonymous(&self) -> &[DeclarationRecord] {
        &self.anonymous
    }

    /// Number of records stored under an identity.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.anonymous.is_empty()
    }

    /// Named plus anonymous records.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.entries.len() + self.anonymous.len()
    }

    /// Find a named record by its `name` field.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<(&SymbolIdentity, &DeclarationRecord)> {
        self.iter().find(|(_, record)| record.name() == name)
    }

    /// Encode the document as JSON.
    ///
    /// # Errors
    /// Returns `CoreError::Json` if encoding fails.
    pub fn to_json(&self, pretty: bool) -> Result<String, CoreError> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }

    /// Decode a document previously written by [`ProgramDocument::to_json`].
    ///
    /// # Errors
    /// Returns `CoreError::Json` for invalid JSON or records that do not match
    /// the format.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl Serialize for ProgramDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len() + 1))?;
        map.serialize_entry(ANONYMOUS_KEY, &self.anonymous)?;
        for (identity, record) in &self.entries {
            map.serialize_entry(identity, record)?;
        }
        map.end()
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = ProgramDocument;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of symbol identities to declaration records")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut document = ProgramDocument::new();
        let mut saw_anonymous = false;
        while let Some(key) = access.next_key::<String>()? {
            if key == ANONYMOUS_KEY {
                let records: Vec<DeclarationRecord> = access.next_value()?;
                document.anonymous.extend(records);
                saw_anonymous = true;
            } else {
                let record: DeclarationRecord = access.next_value()?;
                document.insert(SymbolIdentity::from(key), record);
            }
        }
        if !saw_anonymous {
            return Err(serde::de::Error::missing_field(ANONYMOUS_KEY));
        }
        Ok(document)
    }
}

impl<'de> Deserialize<'de> for ProgramDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

impl JsonSchema for ProgramDocument {
    fn schema_name() -> Cow<'static, str> {
        "ProgramDocument".into()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        let record = generator.subschema_for::<DeclarationRecord>();
        json_schema!({
            "type": "object",
            "description": "Declarations keyed by symbol identity; the empty key holds records without one.",
            "properties": {
                "": {
                    "type": "array",
                    "items": record.clone()
                }
            },
            "required": [""],
            "additionalProperties": record
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{CompositeRecord, EnumRecord, MacroRecord, MacroValue};

    fn composite(name: &str) -> DeclarationRecord {
        DeclarationRecord::Struct(CompositeRecord {
            name: name.to_string(),
            fields: Vec::new(),
        })
    }

    fn macro_record(name: &str, value: i64) -> DeclarationRecord {
        DeclarationRecord::Macro(MacroRecord {
            name: name.to_string(),
            value: Some(MacroValue::Integer(value)),
        })
    }

    #[test]
    fn empty_identity_goes_to_anonymous_list() {
        let mut doc = ProgramDocument::new();
        doc.insert(SymbolIdentity::anonymous(), composite(""));
        doc.insert(SymbolIdentity::anonymous(), composite(""));
        assert_eq!(doc.len(), 0);
        assert_eq!(doc.anonymous().len(), 2);
        assert_eq!(doc.record_count(), 2);
    }

    #[test]
    fn collision_replaces_and_keeps_position() {
        let mut doc = ProgramDocument::new();
        assert!(doc.insert("c:@S@a".into(), composite("a")).is_none());
        assert!(doc.insert("c:@S@b".into(), composite("b")).is_none());
        let replaced = doc.insert("c:@S@a".into(), macro_record("a", 1));

        assert_eq!(replaced, Some(composite("a")));
        assert_eq!(doc.len(), 2);
        let order: Vec<&str> = doc.identities().map(SymbolIdentity::as_str).collect();
        assert_eq!(order, vec!["c:@S@a", "c:@S@b"]);
        assert_eq!(doc.get("c:@S@a"), Some(&macro_record("a", 1)));
    }

    #[test]
    fn anonymous_key_is_serialized_first_even_when_empty() {
        let mut doc = ProgramDocument::new();
        doc.insert("c:@E@color".into(), DeclarationRecord::Enum(EnumRecord::default()));
        let text = doc.to_json(false).expect("encode document");
        assert!(text.starts_with(r#"{"":[],"c:@E@color""#), "got {text}");
    }

    #[test]
    fn keys_keep_insertion_order() {
        let mut doc = ProgramDocument::new();
        for id in ["c:@S@zeta", "c:@S@alpha", "c:@S@mid"] {
            doc.insert(id.into(), composite(id));
        }
        let value: serde_json::Value =
            serde_json::from_str(&doc.to_json(true).expect("encode")).expect("reparse");
        let keys: Vec<&String> = value.as_object().expect("object").keys().collect();
        assert_eq!(keys, vec!["", "c:@S@zeta", "c:@S@alpha", "c:@S@mid"]);
    }

    #[test]
    fn decodes_back_into_same_document() {
        let mut doc = ProgramDocument::new();
        doc.insert("c:@macro@N".into(), macro_record("N", 42));
        doc.insert(SymbolIdentity::anonymous(), composite(""));

        let text = doc.to_json(true).expect("encode document");
        let decoded = ProgramDocument::from_json(&text).expect("decode document");
        assert_eq!(decoded, doc);
    }

    #[test]
    fn rejects_record_without_kind() {
        let text = json!({"": [], "c:@F@f": {"name": "f"}}).to_string();
        assert!(ProgramDocument::from_json(&text).is_err());
    }

    #[test]
    fn rejects_document_without_anonymous_key() {
        let text = json!({"c:@macro@N": {"kind": "macro", "name": "N"}}).to_string();
        assert!(ProgramDocument::from_json(&text).is_err());
    }

    #[test]
    fn find_by_name_scans_named_records() {
        let mut doc = ProgramDocument::new();
        doc.insert("c:@S@point".into(), composite("point"));
        let (identity, record) = doc.find_by_name("point").expect("point present");
        assert_eq!(identity.as_str(), "c:@S@point");
        assert_eq!(record.name(), "point");
        assert!(doc.find_by_name("missing").is_none());
    }
}
