//! Binding registry — two-key exact-match resolution of qualified bindings.
//!
//! The lifecycle is deliberately two-phase. A [`RegistryBuilder`] collects
//! bindings during single-threaded startup configuration and rejects
//! duplicates the moment they are registered. [`RegistryBuilder::seal`] then
//! converts the builder into an immutable [`BindingRegistry`]; from that
//! point every operation is a plain read, safe to share across threads
//! without synchronization.
//!
//! Resolution is exact on both key components. A qualified lookup never
//! falls back to the unqualified binding, and no qualifier ever satisfies a
//! lookup written against a different one.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::bindings::binding::{Binding, BindingDescriptor, BindingKey};
use crate::bindings::capability::CapabilityId;
use crate::bindings::errors::BindingError;
use crate::bindings::qualifier::Qualifier;
use crate::providers::Provider;

// ---------------------------------------------------------------------------
// Global installation
// ---------------------------------------------------------------------------

static INSTALLED: OnceLock<BindingRegistry> = OnceLock::new();

/// Install a sealed registry as the process-wide instance.
///
/// Fails with [`BindingError::AlreadyInstalled`] on a second call; the first
/// installed registry stays in effect. Applications that pass the registry
/// around by reference never need this.
pub fn install(registry: BindingRegistry) -> Result<&'static BindingRegistry, BindingError> {
    INSTALLED
        .set(registry)
        .map_err(|_| BindingError::AlreadyInstalled)?;
    global()
}

/// The process-wide registry, if one has been installed.
pub fn global() -> Result<&'static BindingRegistry, BindingError> {
    INSTALLED.get().ok_or(BindingError::NotInstalled)
}

// ---------------------------------------------------------------------------
// Builder (startup configuration phase)
// ---------------------------------------------------------------------------

/// Mutable collector for the startup configuration phase.
///
/// `register` each binding, then [`seal`](Self::seal) into the immutable
/// [`BindingRegistry`]. Duplicates are rejected here, at configuration time,
/// so a misconfigured binding set fails before the capability is ever used.
#[derive(Default)]
pub struct RegistryBuilder {
    bindings: HashMap<BindingKey, Binding>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider for the exact (capability, qualifier-or-none)
    /// pair.
    ///
    /// Fails with [`BindingError::InvalidCapability`] if the capability name
    /// is empty, and with [`BindingError::DuplicateBinding`] if the pair is
    /// already bound — the earlier registration stays in effect.
    pub fn register(
        &mut self,
        capability: CapabilityId,
        qualifier: Option<Qualifier>,
        provider: Arc<dyn Provider>,
    ) -> Result<(), BindingError> {
        if capability.is_empty() {
            return Err(BindingError::InvalidCapability);
        }

        let key = BindingKey {
            capability: capability.clone(),
            qualifier: qualifier.clone(),
        };
        if self.bindings.contains_key(&key) {
            return Err(BindingError::DuplicateBinding {
                capability: capability.as_str().to_string(),
                qualifier: qualifier_label(qualifier.as_ref()),
            });
        }

        log::debug!(
            "[BindingRegistry] registered '{}' (qualifier: {}) -> {}",
            capability,
            qualifier_label(qualifier.as_ref()),
            provider.describe()
        );

        self.bindings.insert(
            key,
            Binding {
                capability,
                qualifier,
                provider,
            },
        );
        Ok(())
    }

    /// Number of bindings registered so far.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no bindings have been registered yet.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Finish configuration: freeze the binding set into an immutable
    /// registry.
    pub fn seal(self) -> BindingRegistry {
        log::debug!(
            "[BindingRegistry] sealed with {} binding(s)",
            self.bindings.len()
        );
        BindingRegistry {
            bindings: self.bindings,
        }
    }
}

// ---------------------------------------------------------------------------
// Sealed registry (resolution phase)
// ---------------------------------------------------------------------------

/// Immutable binding set produced by [`RegistryBuilder::seal`].
///
/// Holds bindings indexed by their exact (capability, qualifier-or-none)
/// key. All operations are reads; the registry is `Send + Sync` and may be
/// shared freely.
#[derive(Debug, Default)]
pub struct BindingRegistry {
    bindings: HashMap<BindingKey, Binding>,
}

impl BindingRegistry {
    /// Resolve the provider registered for the exact pair.
    ///
    /// Fails with [`BindingError::UnresolvedBinding`] when no binding
    /// matches. Matching is exact on both components: no fallback to the
    /// unqualified binding, no fallback between qualifiers.
    pub fn resolve(
        &self,
        capability: &CapabilityId,
        qualifier: Option<&Qualifier>,
    ) -> Result<Arc<dyn Provider>, BindingError> {
        if capability.is_empty() {
            return Err(BindingError::InvalidCapability);
        }

        let key = BindingKey {
            capability: capability.clone(),
            qualifier: qualifier.cloned(),
        };
        match self.bindings.get(&key) {
            Some(binding) => Ok(Arc::clone(&binding.provider)),
            None => Err(BindingError::UnresolvedBinding {
                capability: capability.as_str().to_string(),
                qualifier: qualifier_label(qualifier),
            }),
        }
    }

    /// Resolve and downcast the provided instance to `T`.
    ///
    /// Convenience over [`resolve`](Self::resolve) + `provide()` + downcast.
    /// A type mismatch fails with [`BindingError::WrongInstanceType`] so a
    /// mis-typed consumer fails loudly instead of receiving a provider it
    /// cannot use.
    pub fn resolve_instance<T: Any + Send + Sync>(
        &self,
        capability: &CapabilityId,
        qualifier: Option<&Qualifier>,
    ) -> Result<Arc<T>, BindingError> {
        let provider = self.resolve(capability, qualifier)?;
        provider
            .provide()
            .downcast::<T>()
            .map_err(|_| BindingError::WrongInstanceType {
                capability: capability.as_str().to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the registry holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// All registered bindings.
    pub fn list(&self) -> Vec<&Binding> {
        self.bindings.values().collect()
    }

    /// All bindings registered under the given capability, across every
    /// qualifier.
    pub fn bindings_for(&self, capability: &CapabilityId) -> Vec<&Binding> {
        self.bindings
            .values()
            .filter(|b| &b.capability == capability)
            .collect()
    }

    /// Serializable snapshot of the binding table, sorted by capability and
    /// qualifier label so output is stable across runs.
    pub fn snapshot(&self) -> Vec<BindingDescriptor> {
        let mut rows: Vec<BindingDescriptor> =
            self.bindings.values().map(Binding::descriptor).collect();
        rows.sort_by(|a, b| {
            (&a.capability, &a.qualifier).cmp(&(&b.capability, &b.qualifier))
        });
        rows
    }

    /// Log the full binding table as JSON at info level.
    ///
    /// Intended for the end of startup configuration, so logs record exactly
    /// which binding set the process is running with.
    pub fn log_bindings(&self) {
        match serde_json::to_string(&self.snapshot()) {
            Ok(json) => log::info!("[BindingRegistry] bindings: {json}"),
            Err(e) => log::warn!("[BindingRegistry] failed to serialize bindings: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Qualifier label for error messages and logs; "none" for the default
/// binding.
fn qualifier_label(qualifier: Option<&Qualifier>) -> String {
    match qualifier {
        Some(q) => q.label().to_string(),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use once_cell::sync::Lazy;

    use super::*;
    use crate::providers::{FactoryProvider, InstanceProvider};

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn provider(description: &str) -> Arc<dyn Provider> {
        Arc::new(InstanceProvider::new(description, description.to_string()))
    }

    #[test]
    fn register_and_resolve_qualified_binding() {
        init_logs();
        let capability = CapabilityId::new("client");
        let team_service = Qualifier::new("team-service");

        let mut builder = RegistryBuilder::new();
        builder
            .register(capability.clone(), Some(team_service.clone()), provider("provider-x"))
            .unwrap();
        let registry = builder.seal();

        let resolved = registry.resolve(&capability, Some(&team_service)).unwrap();
        assert_eq!(resolved.describe(), "provider-x");
    }

    // Qualifiers are typically declared once as statics and shared by wiring
    // and consumers alike.
    static AUDIT_STORE: Lazy<Qualifier> = Lazy::new(|| Qualifier::new("audit-store"));

    #[test]
    fn statically_declared_qualifier_resolves() {
        let capability = CapabilityId::new("store");

        let mut builder = RegistryBuilder::new();
        builder
            .register(capability.clone(), Some(AUDIT_STORE.clone()), provider("audit store"))
            .unwrap();
        let registry = builder.seal();

        let resolved = registry.resolve(&capability, Some(&AUDIT_STORE)).unwrap();
        assert_eq!(resolved.describe(), "audit store");
    }

    #[test]
    fn unregistered_qualifier_does_not_resolve() {
        let capability = CapabilityId::new("client");
        let team_service = Qualifier::new("team-service");
        let other = Qualifier::new("other");

        let mut builder = RegistryBuilder::new();
        builder
            .register(capability.clone(), Some(team_service), provider("provider-x"))
            .unwrap();
        let registry = builder.seal();

        let err = registry.resolve(&capability, Some(&other)).err().unwrap();
        assert!(matches!(err, BindingError::UnresolvedBinding { .. }));
    }

    #[test]
    fn duplicate_registration_fails_and_keeps_first() {
        let capability = CapabilityId::new("client");
        let team_service = Qualifier::new("team-service");

        let mut builder = RegistryBuilder::new();
        builder
            .register(capability.clone(), Some(team_service.clone()), provider("provider-x"))
            .unwrap();
        let err = builder
            .register(capability.clone(), Some(team_service.clone()), provider("provider-y"))
            .unwrap_err();
        assert!(matches!(err, BindingError::DuplicateBinding { .. }));

        let registry = builder.seal();
        let resolved = registry.resolve(&capability, Some(&team_service)).unwrap();
        assert_eq!(resolved.describe(), "provider-x");
    }

    #[test]
    fn no_fallback_between_qualified_and_unqualified() {
        let capability = CapabilityId::new("client");
        let team_service = Qualifier::new("team-service");

        let mut builder = RegistryBuilder::new();
        builder
            .register(capability.clone(), None, provider("default"))
            .unwrap();
        builder
            .register(capability.clone(), Some(team_service.clone()), provider("qualified"))
            .unwrap();
        let registry = builder.seal();

        let qualified = registry.resolve(&capability, Some(&team_service)).unwrap();
        assert_eq!(qualified.describe(), "qualified");

        let unqualified = registry.resolve(&capability, None).unwrap();
        assert_eq!(unqualified.describe(), "default");

        // A qualifier with no binding of its own must not fall back to the
        // default binding.
        let unbound = Qualifier::new("unbound");
        assert!(registry.resolve(&capability, Some(&unbound)).is_err());
    }

    #[test]
    fn same_label_qualifier_is_a_different_binding() {
        let capability = CapabilityId::new("client");
        let declared = Qualifier::new("team-service");
        let impostor = Qualifier::new("team-service");

        let mut builder = RegistryBuilder::new();
        builder
            .register(capability.clone(), Some(declared.clone()), provider("real"))
            .unwrap();
        let registry = builder.seal();

        assert!(registry.resolve(&capability, Some(&declared)).is_ok());
        assert!(matches!(
            registry.resolve(&capability, Some(&impostor)),
            Err(BindingError::UnresolvedBinding { .. })
        ));
    }

    #[test]
    fn repeated_resolution_returns_the_same_provider() {
        let capability = CapabilityId::new("client");

        let mut builder = RegistryBuilder::new();
        builder
            .register(capability.clone(), None, provider("stable"))
            .unwrap();
        let registry = builder.seal();

        let first = registry.resolve(&capability, None).unwrap();
        let second = registry.resolve(&capability, None).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn empty_capability_is_rejected() {
        let mut builder = RegistryBuilder::new();
        let err = builder
            .register(CapabilityId::new(""), None, provider("anything"))
            .unwrap_err();
        assert!(matches!(err, BindingError::InvalidCapability));

        let registry = builder.seal();
        assert!(matches!(
            registry.resolve(&CapabilityId::new(""), None),
            Err(BindingError::InvalidCapability)
        ));
    }

    #[test]
    fn resolve_instance_downcasts_to_the_concrete_type() {
        let capability = CapabilityId::new("greeting");

        let mut builder = RegistryBuilder::new();
        builder
            .register(
                capability.clone(),
                None,
                Arc::new(InstanceProvider::new("greeting text", "hello".to_string())),
            )
            .unwrap();
        let registry = builder.seal();

        let text: Arc<String> = registry.resolve_instance(&capability, None).unwrap();
        assert_eq!(*text, "hello");

        let err = registry
            .resolve_instance::<u32>(&capability, None)
            .unwrap_err();
        assert!(matches!(err, BindingError::WrongInstanceType { .. }));
    }

    #[test]
    fn factory_bindings_produce_fresh_instances() {
        let capability = CapabilityId::new("scratch-buffer");

        let mut builder = RegistryBuilder::new();
        builder
            .register(
                capability.clone(),
                None,
                Arc::new(FactoryProvider::new("empty buffer", Vec::<u8>::new)),
            )
            .unwrap();
        let registry = builder.seal();

        let a: Arc<Vec<u8>> = registry.resolve_instance(&capability, None).unwrap();
        let b: Arc<Vec<u8>> = registry.resolve_instance(&capability, None).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn enumeration_and_snapshot_cover_every_binding() {
        let client = CapabilityId::new("client");
        let store = CapabilityId::new("store");
        let team_service = Qualifier::new("team-service");

        let mut builder = RegistryBuilder::new();
        builder
            .register(client.clone(), None, provider("default client"))
            .unwrap();
        builder
            .register(client.clone(), Some(team_service), provider("team client"))
            .unwrap();
        builder
            .register(store.clone(), None, provider("store"))
            .unwrap();
        let registry = builder.seal();

        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
        assert_eq!(registry.list().len(), 3);
        assert_eq!(registry.bindings_for(&client).len(), 2);
        assert_eq!(registry.bindings_for(&store).len(), 1);

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 3);
        // Sorted: capability first, unqualified before qualified.
        assert_eq!(snapshot[0].capability, client);
        assert_eq!(snapshot[0].qualifier, None);
        assert_eq!(snapshot[1].qualifier.as_deref(), Some("team-service"));
        assert_eq!(snapshot[2].capability, store);
    }

    // Installation touches process-global state, so the whole sequence lives
    // in one test.
    #[test]
    fn install_once_then_read_globally() {
        let capability = CapabilityId::new("installed");

        let mut builder = RegistryBuilder::new();
        builder
            .register(capability.clone(), None, provider("global provider"))
            .unwrap();

        let installed = install(builder.seal()).unwrap();
        assert!(installed.resolve(&capability, None).is_ok());

        let via_global = global().unwrap();
        assert!(via_global.resolve(&capability, None).is_ok());

        let err = install(BindingRegistry::default()).unwrap_err();
        assert!(matches!(err, BindingError::AlreadyInstalled));
        // The first installation stays in effect.
        assert!(global().unwrap().resolve(&capability, None).is_ok());
    }
}
