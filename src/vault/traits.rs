//! The capability every secret backend provides.

use crate::errors::Result;

/// Trait for secret storage backends.
///
/// Implementations:
/// - Encrypted files on disk (`FileSecretStore`)
/// - In-memory for tests (`MemorySecretStore`)
/// - OS keychain (`KeyringSecretStore`, behind the `keyring-store` feature)
///
/// Every operation returns an explicit `Result`.  A missing secret is
/// `Ok(None)`, never an error.
///
/// # Example
///
/// ```
/// use keystash::vault::{MemorySecretStore, SecretStore};
///
/// let store = MemorySecretStore::new();
/// store.store("api_token", "secret123").unwrap();
/// assert_eq!(store.retrieve("api_token").unwrap().as_deref(), Some("secret123"));
/// ```
pub trait SecretStore: Send + Sync {
    /// Static identifier of the backend, for logging and display.
    fn name(&self) -> &'static str;

    /// Store `value` under `key`, replacing any previous value.
    fn store(&self, key: &str, value: &str) -> Result<()>;

    /// Fetch the value stored under `key`, or `None` if there is none.
    fn retrieve(&self, key: &str) -> Result<Option<String>>;

    /// Remove `key`.  Removing a missing key succeeds.
    fn delete(&self, key: &str) -> Result<()>;

    /// Whether a value is stored under `key`.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.retrieve(key)?.is_some())
    }
}

impl<S: SecretStore + ?Sized> SecretStore for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        (**self).store(key, value)
    }

    fn retrieve(&self, key: &str) -> Result<Option<String>> {
        (**self).retrieve(key)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }

    fn contains(&self, key: &str) -> Result<bool> {
        (**self).contains(key)
    }
}
