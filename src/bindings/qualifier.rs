//! Qualifier identity — the tag that tells same-capability bindings apart.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static QUALIFIER_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque tag distinguishing multiple bindings of the same capability.
///
/// A qualifier's identity is the process-unique numeric id assigned when it
/// is declared; the label exists for humans only. Clones of one declaration
/// compare equal. Two separate declarations never do, even when their labels
/// collide, so introducing a new qualifier can never satisfy a lookup that
/// was written against an older one.
#[derive(Clone)]
pub struct Qualifier {
    /// Human-readable label.
    label: String,
    /// Unique numeric ID (monotonically increasing).
    id: u64,
}

impl Qualifier {
    /// Declare a new qualifier with the given human-readable label.
    ///
    /// Declare once, at startup, and share the value (or clones of it) with
    /// every registration and lookup that should match.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            id: QUALIFIER_ID_COUNTER.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// The human-readable label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Qualifier({}:{})", self.id, self.label)
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl PartialEq for Qualifier {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Qualifier {}

impl std::hash::Hash for Qualifier {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
