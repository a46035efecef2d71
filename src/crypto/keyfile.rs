//! Master key file lifecycle.
//!
//! The master key lives in a single text file holding the standard
//! base64 encoding of 32 random bytes.  `MasterKeyProvider` creates it
//! on first use, loads and validates it afterwards, and can destroy it
//! with `reset_key`.
//!
//! Anything that decodes to something other than 32 bytes is reported
//! as `MasterKeyCorrupted`, never as an I/O error: a corrupted key is
//! terminal for the vault, while I/O errors may be retried.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::{info, warn};
use zeroize::{Zeroize, Zeroizing};

use super::keys::{MasterKey, KEY_LEN};
use crate::errors::{KeystashError, Result};
use crate::fsutil::{self, Overwrite};

/// Owns the on-disk master key at a fixed path.
#[derive(Debug, Clone)]
pub struct MasterKeyProvider {
    path: PathBuf,
}

impl MasterKeyProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the key file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the existing key, or create and persist a new one.
    ///
    /// Writes at most one file, and only when no key file exists yet.
    pub fn get_or_create(&self) -> Result<MasterKey> {
        if self.path.exists() {
            return self.load();
        }
        self.create()
    }

    /// Delete the current key file and create a brand-new key.
    ///
    /// Every secret encrypted under the previous key becomes
    /// permanently unrecoverable.
    pub fn reset_key(&self) -> Result<MasterKey> {
        warn!(
            path = %self.path.display(),
            "resetting master key, previously stored secrets will be lost"
        );
        fsutil::remove_if_exists(&self.path)?;
        self.create()
    }

    fn create(&self) -> Result<MasterKey> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fsutil::ensure_private_dir(parent)?;
            }
        }

        let key = MasterKey::generate();
        let encoded = Zeroizing::new(BASE64.encode(key.as_bytes()));

        match fsutil::write_private(&self.path, encoded.as_bytes(), Overwrite::Refuse) {
            Ok(()) => {
                info!(path = %self.path.display(), "created new master key");
                Ok(key)
            }
            // Another process created the key between our existence
            // check and the rename; use theirs.
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => self.load(),
            Err(e) => Err(e.into()),
        }
    }

    fn load(&self) -> Result<MasterKey> {
        let raw = Zeroizing::new(fs::read(&self.path)?);

        let text = std::str::from_utf8(&raw)
            .map_err(|_| self.corrupted("file is not valid text"))?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(self.corrupted("file is empty"));
        }

        let mut decoded = BASE64
            .decode(trimmed)
            .map_err(|_| self.corrupted("invalid base64 encoding"))?;

        if decoded.len() != KEY_LEN {
            let reason = format!("expected {KEY_LEN} bytes, got {}", decoded.len());
            decoded.zeroize();
            return Err(self.corrupted(&reason));
        }

        let key = MasterKey::from_slice(&decoded);
        decoded.zeroize();
        key
    }

    fn corrupted(&self, reason: &str) -> KeystashError {
        KeystashError::MasterKeyCorrupted {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn provider(dir: &TempDir) -> MasterKeyProvider {
        MasterKeyProvider::new(dir.path().join("keys").join("master.key"))
    }

    #[test]
    fn creates_key_file_on_first_use() {
        let dir = TempDir::new().unwrap();
        let p = provider(&dir);
        assert!(!p.path().exists());

        p.get_or_create().unwrap();

        let text = fs::read_to_string(p.path()).unwrap();
        assert_eq!(BASE64.decode(text.trim()).unwrap().len(), KEY_LEN);
    }

    #[test]
    fn second_provider_loads_same_key() {
        let dir = TempDir::new().unwrap();
        let first = provider(&dir).get_or_create().unwrap();
        let second = provider(&dir).get_or_create().unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn tolerates_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let p = provider(&dir);
        fs::create_dir_all(p.path().parent().unwrap()).unwrap();
        let encoded = BASE64.encode([9u8; KEY_LEN]);
        fs::write(p.path(), format!("{encoded}\n")).unwrap();

        assert_eq!(p.get_or_create().unwrap().as_bytes(), &[9u8; KEY_LEN]);
    }

    #[test]
    fn blank_file_is_corrupted() {
        let dir = TempDir::new().unwrap();
        let p = provider(&dir);
        fs::create_dir_all(p.path().parent().unwrap()).unwrap();
        fs::write(p.path(), "  \n").unwrap();

        let err = p.get_or_create().unwrap_err();
        assert!(err.is_corrupted_key(), "got {err:?}");
    }

    #[test]
    fn wrong_length_is_corrupted() {
        let dir = TempDir::new().unwrap();
        let p = provider(&dir);
        fs::create_dir_all(p.path().parent().unwrap()).unwrap();
        fs::write(p.path(), BASE64.encode([1u8; 16])).unwrap();

        let err = p.get_or_create().unwrap_err();
        assert!(err.is_corrupted_key());
        assert!(err.to_string().contains("got 16"));
    }

    #[test]
    fn invalid_encoding_is_corrupted() {
        let dir = TempDir::new().unwrap();
        let p = provider(&dir);
        fs::create_dir_all(p.path().parent().unwrap()).unwrap();
        fs::write(p.path(), "this is not base64!!").unwrap();

        assert!(p.get_or_create().unwrap_err().is_corrupted_key());
    }

    #[test]
    fn corrupted_file_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let p = provider(&dir);
        fs::create_dir_all(p.path().parent().unwrap()).unwrap();
        fs::write(p.path(), "garbage").unwrap();

        let _ = p.get_or_create();
        assert_eq!(fs::read_to_string(p.path()).unwrap(), "garbage");
    }

    #[test]
    fn reset_replaces_key() {
        let dir = TempDir::new().unwrap();
        let p = provider(&dir);
        let old = p.get_or_create().unwrap();
        let new = p.reset_key().unwrap();

        assert_ne!(old.as_bytes(), new.as_bytes());
        assert_eq!(p.get_or_create().unwrap().as_bytes(), new.as_bytes());
    }

    #[test]
    fn reset_recovers_from_corruption() {
        let dir = TempDir::new().unwrap();
        let p = provider(&dir);
        fs::create_dir_all(p.path().parent().unwrap()).unwrap();
        fs::write(p.path(), "garbage").unwrap();

        let fresh = p.reset_key().unwrap();
        assert_eq!(p.get_or_create().unwrap().as_bytes(), fresh.as_bytes());
    }

    #[test]
    fn reset_without_existing_key_creates_one() {
        let dir = TempDir::new().unwrap();
        let p = provider(&dir);
        p.reset_key().unwrap();
        assert!(p.path().exists());
    }
}
