//! Cryptographic primitives for keystash.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - The zeroizing in-memory master key (`keys`)
//! - The on-disk master key lifecycle (`keyfile`)

pub mod encryption;
pub mod keyfile;
pub mod keys;

pub use encryption::{decrypt, encrypt};
pub use keyfile::MasterKeyProvider;
pub use keys::{MasterKey, KEY_LEN};
