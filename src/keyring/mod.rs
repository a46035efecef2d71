//! OS keyring backend.
//!
//! Stores secrets in the operating system's credential store:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring / KDE Wallet)
//!
//! Implements the same `SecretStore` contract as the file backend, so
//! the factory can swap one for the other.

use crate::errors::{KeystashError, Result};
use crate::vault::secret::validate_secret_name;
use crate::vault::SecretStore;

/// Service name used in the OS keyring.
const SERVICE_NAME: &str = "keystash";

/// Keyring-backed secret store.  Holds no state; every call opens the
/// platform entry for the given key.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyringSecretStore;

impl KeyringSecretStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(key: &str) -> Result<::keyring::Entry> {
        validate_secret_name(key)?;
        ::keyring::Entry::new(SERVICE_NAME, key)
            .map_err(|e| KeystashError::KeyringError(format!("failed to create keyring entry: {e}")))
    }
}

impl SecretStore for KeyringSecretStore {
    fn name(&self) -> &'static str {
        "os-keyring"
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        Self::entry(key)?.set_password(value).map_err(|e| {
            KeystashError::KeyringError(format!("failed to store secret in keyring: {e}"))
        })
    }

    fn retrieve(&self, key: &str) -> Result<Option<String>> {
        match Self::entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(::keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(KeystashError::KeyringError(format!(
                "failed to read from keyring: {e}"
            ))),
        }
    }

    fn delete(&self, key: &str) -> Result<()> {
        match Self::entry(key)?.delete_credential() {
            Ok(()) | Err(::keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(KeystashError::KeyringError(format!(
                "failed to delete from keyring: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_stable() {
        assert_eq!(KeyringSecretStore::new().name(), "os-keyring");
    }

    #[test]
    fn empty_name_is_rejected_without_touching_keyring() {
        let err = KeyringSecretStore::new().store("", "x").unwrap_err();
        assert!(matches!(err, KeystashError::InvalidSecretName(_)));
    }

    #[test]
    fn long_names_pass_validation() {
        assert!(validate_secret_name(&"k".repeat(1024)).is_ok());
        assert!(validate_secret_name(&"鍵".repeat(100)).is_ok());
    }
}
