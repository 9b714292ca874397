//! Provider interfaces for capability bindings.
//!
//! Provides the trait-based provider pattern used by the binding registry.
//! A provider is anything capable of holding or producing a concrete
//! instance satisfying a capability; the two stock implementations cover the
//! common cases, and custom implementations can be swapped in anywhere an
//! `Arc<dyn Provider>` is accepted.

use std::any::Any;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Supplies the concrete instance behind a binding.
///
/// Instances are type-erased; consumers downcast to the concrete type they
/// expect (or use `BindingRegistry::resolve_instance`, which downcasts and
/// turns a mismatch into an error).
pub trait Provider: Send + Sync {
    /// Human-readable description for diagnostics
    /// (e.g., "team-service HTTP client").
    fn describe(&self) -> &str;

    /// Produce the instance satisfying the bound capability.
    fn provide(&self) -> Arc<dyn Any + Send + Sync>;
}

// ---------------------------------------------------------------------------
// Held-instance provider
// ---------------------------------------------------------------------------

/// Provider holding a single shared instance.
///
/// Every `provide()` call hands out the same instance. This is the right
/// choice for stateful collaborators constructed once at startup.
pub struct InstanceProvider {
    description: String,
    instance: Arc<dyn Any + Send + Sync>,
}

impl InstanceProvider {
    /// Wrap a concrete instance.
    pub fn new<T: Any + Send + Sync>(description: impl Into<String>, instance: T) -> Self {
        Self {
            description: description.into(),
            instance: Arc::new(instance),
        }
    }

    /// Wrap an instance that is already shared.
    pub fn from_arc<T: Any + Send + Sync>(
        description: impl Into<String>,
        instance: Arc<T>,
    ) -> Self {
        Self {
            description: description.into(),
            instance,
        }
    }
}

impl Provider for InstanceProvider {
    fn describe(&self) -> &str {
        &self.description
    }

    fn provide(&self) -> Arc<dyn Any + Send + Sync> {
        Arc::clone(&self.instance)
    }
}

// ---------------------------------------------------------------------------
// Factory provider
// ---------------------------------------------------------------------------

/// Provider invoking a factory closure on every `provide()` call.
///
/// Use when each consumer should receive a freshly produced instance.
pub struct FactoryProvider {
    description: String,
    factory: Box<dyn Fn() -> Arc<dyn Any + Send + Sync> + Send + Sync>,
}

impl FactoryProvider {
    /// Wrap a factory producing instances of `T`.
    pub fn new<T, F>(description: impl Into<String>, factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            factory: Box::new(move || Arc::new(factory())),
        }
    }
}

impl Provider for FactoryProvider {
    fn describe(&self) -> &str {
        &self.description
    }

    fn provide(&self) -> Arc<dyn Any + Send + Sync> {
        (self.factory)()
    }
}
