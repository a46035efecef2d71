//! Store construction.
//!
//! Resolves paths from `Settings` and wires the chosen backend into a
//! `Box<dyn SecretStore>`.  Build one store at startup and hand it to
//! every consumer; there is no global instance.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{Backend, Settings};
use crate::errors::{KeystashError, Result};
use crate::vault::{FileSecretStore, SecretStore};

/// Name of the default base directory under the user's home.
pub const DEFAULT_BASE_DIR_NAME: &str = ".keystash";

/// `~/.keystash`, or an error when the home directory is unknown.
pub fn default_base_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_BASE_DIR_NAME))
        .ok_or_else(|| KeystashError::ConfigError("cannot determine home directory".into()))
}

/// Build the file backend rooted at `base_dir`.
pub fn open_file_store(base_dir: &Path, settings: &Settings) -> Result<FileSecretStore> {
    FileSecretStore::open(
        &settings.secrets_path(base_dir),
        &settings.key_path(base_dir),
    )
}

/// Build the backend selected by `settings`.
pub fn create_store(base_dir: &Path, settings: &Settings) -> Result<Box<dyn SecretStore>> {
    let store: Box<dyn SecretStore> = match settings.backend {
        Backend::File => Box::new(open_file_store(base_dir, settings)?),
        Backend::Keyring => keyring_store()?,
    };

    info!(backend = store.name(), "using secret store backend");
    Ok(store)
}

/// Load `<base_dir>/keystash.toml` and build the selected backend.
pub fn create_store_from_dir(base_dir: &Path) -> Result<Box<dyn SecretStore>> {
    let settings = Settings::load(base_dir)?;
    create_store(base_dir, &settings)
}

#[cfg(feature = "keyring-store")]
fn keyring_store() -> Result<Box<dyn SecretStore>> {
    Ok(Box::new(crate::keyring::KeyringSecretStore::new()))
}

#[cfg(not(feature = "keyring-store"))]
fn keyring_store() -> Result<Box<dyn SecretStore>> {
    Err(KeystashError::ConfigError(
        "backend \"keyring\" requires building with the `keyring-store` feature".into(),
    ))
}
