//! # Named-Binding Registry
//!
//! Lets an application bind the *same* capability more than once and still
//! resolve unambiguously: a consumer asks for "the provider registered for
//! capability `C` under qualifier `Q`", not just "the provider for `C`".
//!
//! ## Architecture
//!
//! A binding is the triple (capability, qualifier-or-none, provider). The
//! qualifier is an opaque tag whose only semantic content is its own
//! identity; the registry matches lookups by exact equality on both key
//! components, so a second qualifier can never accidentally satisfy a
//! lookup written against the first.
//!
//! ## Binding Resolution Flow
//!
//! 1. Startup wiring declares qualifiers and registers each provider:
//!    `builder.register(capability, Some(team_service), provider)`
//! 2. `RegistryBuilder::seal()` freezes the binding set; duplicates were
//!    already rejected at registration time
//! 3. Optionally, `install(registry)` publishes the sealed registry
//!    process-wide
//! 4. Consumers call `registry.resolve(&capability, Some(&team_service))`
//!    (or `resolve_instance::<T>` to downcast in one step) and use the
//!    provider according to the capability's own contract

pub mod binding;
pub mod capability;
pub mod errors;
pub mod qualifier;
pub mod registry;

pub use binding::{Binding, BindingDescriptor};
pub use capability::CapabilityId;
pub use errors::BindingError;
pub use qualifier::Qualifier;
pub use registry::{global, install, BindingRegistry, RegistryBuilder};
