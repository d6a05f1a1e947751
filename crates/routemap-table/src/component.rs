//! Opaque component references.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to a renderable unit.
///
/// The identifier selects the component and the optional content hash busts
/// client caches when it changes. Neither field is interpreted by the
/// resolver; two references are equal only when both fields are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentRef {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hash: Option<String>,
}

impl ComponentRef {
    /// Create a component reference.
    #[must_use]
    pub fn new(id: impl Into<String>, hash: Option<&str>) -> Self {
        Self {
            id: id.into(),
            hash: hash.map(str::to_owned),
        }
    }

    /// Component identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Content hash, absent for generated fallback components.
    #[must_use]
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hash {
            Some(hash) => write!(f, "{}@{hash}", self.id),
            None => f.write_str(&self.id),
        }
    }
}
