//! Binding registry errors.

use thiserror::Error;

/// Errors raised during binding registration, resolution, or installation.
///
/// All of these are deterministic configuration errors: there is nothing
/// transient to retry, and none are recovered internally. A duplicate or
/// missing binding must stop startup (or the specific resolution) rather
/// than silently route to a different provider.
#[derive(Debug, Error)]
pub enum BindingError {
    /// Capability name was empty.
    #[error("Invalid capability id: name must be non-empty")]
    InvalidCapability,

    /// A binding already exists for the exact (capability, qualifier) pair.
    #[error("Duplicate binding for capability '{capability}' (qualifier: {qualifier})")]
    DuplicateBinding {
        capability: String,
        qualifier: String,
    },

    /// No binding matches the exact (capability, qualifier) pair.
    #[error("No binding for capability '{capability}' (qualifier: {qualifier})")]
    UnresolvedBinding {
        capability: String,
        qualifier: String,
    },

    /// The resolved provider produced an instance of a different type.
    #[error("Provider for capability '{capability}' did not produce a {expected}")]
    WrongInstanceType {
        capability: String,
        expected: &'static str,
    },

    /// A registry has already been installed for this process.
    #[error("A binding registry is already installed")]
    AlreadyInstalled,

    /// No registry has been installed for this process.
    #[error("No binding registry has been installed")]
    NotInstalled,
}
