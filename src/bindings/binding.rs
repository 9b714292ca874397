//! Binding records — what the registry stores and what it reports.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::bindings::capability::CapabilityId;
use crate::bindings::qualifier::Qualifier;
use crate::providers::Provider;

/// One registered binding: a capability, an optional qualifier, and the
/// provider that satisfies the pair.
#[derive(Clone)]
pub struct Binding {
    /// The capability this binding satisfies.
    pub capability: CapabilityId,

    /// The qualifier the binding was registered under. `None` is the
    /// default (unqualified) binding for the capability.
    pub qualifier: Option<Qualifier>,

    /// Supplies the concrete instance.
    pub provider: Arc<dyn Provider>,
}

impl Binding {
    /// A serializable descriptor of this binding for diagnostics.
    pub fn descriptor(&self) -> BindingDescriptor {
        BindingDescriptor {
            capability: self.capability.clone(),
            qualifier: self.qualifier.as_ref().map(|q| q.label().to_string()),
            provider: self.provider.describe().to_string(),
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("capability", &self.capability)
            .field("qualifier", &self.qualifier)
            .field("provider", &self.provider.describe())
            .finish()
    }
}

/// Exact-match lookup key: capability plus qualifier-or-none.
///
/// Qualifier equality (and hashing) follows declaration identity, so two
/// keys match only when they name the same capability string and the same
/// declared qualifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct BindingKey {
    pub(crate) capability: CapabilityId,
    pub(crate) qualifier: Option<Qualifier>,
}

/// Snapshot row describing one binding: capability name, qualifier label
/// (if any), and the provider's self-description. Labels only — provider
/// internals are never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingDescriptor {
    /// Capability name.
    pub capability: CapabilityId,

    /// Qualifier label, absent for the default binding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,

    /// Provider description.
    pub provider: String,
}
