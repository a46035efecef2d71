//! keystash — a local, file-backed encrypted secret vault.
//!
//! Secrets are sealed with AES-256-GCM under a random master key kept in
//! a private file next to them.  Callers depend on the [`SecretStore`]
//! trait and get a concrete backend from [`factory::create_store`].
//!
//! ```no_run
//! use keystash::config::Settings;
//! use keystash::factory;
//! use keystash::SecretStore;
//!
//! let base = factory::default_base_dir()?;
//! let store = factory::create_store(&base, &Settings::load(&base)?)?;
//! store.store("api_token", "secret123")?;
//! assert_eq!(store.retrieve("api_token")?.as_deref(), Some("secret123"));
//! # Ok::<(), keystash::KeystashError>(())
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod factory;
pub mod fsutil;
pub mod vault;

#[cfg(feature = "keyring-store")]
pub mod keyring;

pub use crypto::{MasterKey, MasterKeyProvider};
pub use errors::{KeystashError, Result};
pub use vault::{FileSecretStore, MemorySecretStore, SecretStore};
