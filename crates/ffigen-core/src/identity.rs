//! Stable symbol identities.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identity of a declared entity across the translation unit.
///
/// For the libclang oracle this is the entity's USR (e.g. `c:@S@point`).
/// It is empty for entities without a linkage-level identity, such as
/// purely anonymous constructs the compiler assigned nothing to.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct SymbolIdentity(String);

impl SymbolIdentity {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The empty identity, used for records that go to the anonymous list.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for SymbolIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SymbolIdentity {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SymbolIdentity {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::borrow::Borrow<str> for SymbolIdentity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SymbolIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
