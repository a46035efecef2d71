//! In-memory secret store

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::secret::validate_secret_name;
use super::traits::SecretStore;
use crate::errors::Result;

/// In-memory secret store for tests and ephemeral use.
///
/// Secrets are lost when the store is dropped.  Names are validated the
/// same way the file backend validates them, so code exercised against
/// this store behaves the same against a real vault.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: RwLock<HashMap<String, String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of secrets currently held.
    pub fn len(&self) -> usize {
        self.secrets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SecretStore for MemorySecretStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        validate_secret_name(key)?;
        self.secrets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn retrieve(&self, key: &str) -> Result<Option<String>> {
        validate_secret_name(key)?;
        Ok(self
            .secrets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn delete(&self, key: &str) -> Result<()> {
        validate_secret_name(key)?;
        self.secrets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
