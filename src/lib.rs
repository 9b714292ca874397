//! # Bindery
//!
//! A named-binding registry: bind the same capability under multiple
//! qualifiers and resolve by exact match on the (capability, qualifier)
//! pair. Duplicate registrations and unresolved lookups fail fast, at
//! configuration time and resolution time respectively — misconfiguration
//! can never silently route a consumer to the wrong provider.
//!
//! ```
//! use std::sync::Arc;
//! use bindery::{CapabilityId, InstanceProvider, Qualifier, RegistryBuilder};
//!
//! let client = CapabilityId::new("membership-client");
//! let team_service = Qualifier::new("team-service");
//!
//! let mut builder = RegistryBuilder::new();
//! builder.register(
//!     client.clone(),
//!     Some(team_service.clone()),
//!     Arc::new(InstanceProvider::new("team-service client", "stub".to_string())),
//! )?;
//! let registry = builder.seal();
//!
//! let instance: Arc<String> = registry.resolve_instance(&client, Some(&team_service))?;
//! assert_eq!(*instance, "stub");
//! # Ok::<(), bindery::BindingError>(())
//! ```

pub mod bindings;
pub mod providers;

pub use bindings::{
    global, install, Binding, BindingDescriptor, BindingError, BindingRegistry, CapabilityId,
    Qualifier, RegistryBuilder,
};
pub use providers::{FactoryProvider, InstanceProvider, Provider};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
