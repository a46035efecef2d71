//! Vault module — encrypted secret storage.
//!
//! This module provides:
//! - The `SecretStore` contract every backend implements (`traits`)
//! - Identifier to file-name mapping (`secret`)
//! - The versioned per-secret envelope (`format`)
//! - The encrypted file backend `FileSecretStore` (`store`)
//! - An in-memory backend for tests (`memory`)

pub mod format;
pub mod memory;
pub mod secret;
pub mod store;
pub mod traits;

pub use memory::MemorySecretStore;
pub use secret::{file_name, file_stem, sanitize};
pub use store::FileSecretStore;
pub use traits::SecretStore;
