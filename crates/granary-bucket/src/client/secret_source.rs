//! Secret resolution for credential construction.
//!
//! Connectors are constructed from the *names* of secrets, not literal
//! values. A [`SecretSource`] resolves those names at construction time;
//! production code uses [`EnvSecrets`], tests supply a map-backed fake
//! instead of mutating the process environment.

use std::collections::HashMap;

use crate::{Error, Result};

/// Capability for resolving a named secret to its value.
pub trait SecretSource {
    /// Resolves the secret stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the name cannot be resolved. The error
    /// never contains the secret value itself.
    fn resolve(&self, name: &str) -> Result<String>;
}

/// Resolves secrets from process environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecrets;

impl SecretSource for EnvSecrets {
    fn resolve(&self, name: &str) -> Result<String> {
        std::env::var(name)
            .map_err(|_| Error::Config(format!("Environment variable '{}' is not set", name)))
    }
}

impl SecretSource for HashMap<String, String> {
    fn resolve(&self, name: &str) -> Result<String> {
        self.get(name)
            .cloned()
            .ok_or_else(|| Error::Config(format!("Secret '{}' is not present in the source", name)))
    }
}
