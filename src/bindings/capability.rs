//! Capability identity — the abstract contract a consumer depends on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for the abstract contract being requested
/// (e.g., `"team-membership-client"`).
///
/// Compared by exact string equality. The name must be non-empty; the
/// registry rejects empty ids at registration and resolution time.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityId(pub String);

impl CapabilityId {
    /// Create a capability id from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The capability name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name is empty (and therefore invalid to register or
    /// resolve).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CapabilityId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for CapabilityId {
    fn from(name: String) -> Self {
        Self(name)
    }
}
