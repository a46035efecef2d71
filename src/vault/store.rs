//! File-backed secret store.
//!
//! `FileSecretStore` keeps one file per secret under a private
//! directory.  Each file holds a base64 envelope sealed with the vault
//! master key (see `format`).  The master key is loaded once at
//! construction and held for the lifetime of the store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::crypto::{MasterKey, MasterKeyProvider};
use crate::errors::{KeystashError, Result};
use crate::fsutil::{self, Overwrite};

use super::format;
use super::secret::{self, SECRET_FILE_EXTENSION};
use super::traits::SecretStore;

/// The encrypted file backend.
#[derive(Debug)]
pub struct FileSecretStore {
    /// Directory holding one `.bin` file per secret.
    dir: PathBuf,

    /// Owner of the key file, kept for `reset_master_key`.
    provider: MasterKeyProvider,

    /// The vault master key (zeroized on drop).
    master_key: MasterKey,
}

impl FileSecretStore {
    /// Backend identifier reported by `SecretStore::name`.
    pub const NAME: &'static str = "file-aes-gcm";

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open (or initialize) a store whose secrets live in `dir` and
    /// whose master key lives at `key_path`.
    ///
    /// Creates the directory with owner-only permissions and loads the
    /// master key, creating it on first use.  A corrupted key file
    /// fails construction with `MasterKeyCorrupted`.
    pub fn open(dir: &Path, key_path: &Path) -> Result<Self> {
        fsutil::ensure_private_dir(dir)?;

        let provider = MasterKeyProvider::new(key_path);
        let master_key = provider.get_or_create()?;

        Ok(Self {
            dir: dir.to_path_buf(),
            provider,
            master_key,
        })
    }

    // ------------------------------------------------------------------
    // Key management
    // ------------------------------------------------------------------

    /// Replace the master key with a freshly generated one.
    ///
    /// Every secret written before the reset becomes unrecoverable;
    /// their files stay on disk and fail authentication on retrieve.
    /// Taking `&mut self` keeps other operations out while the key
    /// is swapped.
    pub fn reset_master_key(&mut self) -> Result<()> {
        self.master_key = self.provider.reset_key()?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Directory holding the secret files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the master key file.
    pub fn key_path(&self) -> &Path {
        self.provider.path()
    }

    /// Path of the file that holds (or would hold) `key`.
    pub fn secret_path(&self, key: &str) -> Result<PathBuf> {
        Ok(self.dir.join(secret::file_name(key)?))
    }

    /// Number of secret files in the store directory.
    ///
    /// Counts files on disk, including ones sealed under an older key
    /// or with a newer envelope version.
    pub fn stored_count(&self) -> Result<usize> {
        let mut count = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(SECRET_FILE_EXTENSION)
            {
                count += 1;
            }
        }
        Ok(count)
    }
}

impl SecretStore for FileSecretStore {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        let path = self.secret_path(key)?;
        let sealed = format::seal(&self.master_key, value)?;

        fsutil::write_private(&path, sealed.as_bytes(), Overwrite::Replace)?;
        debug!(file = %path.display(), "stored secret");
        Ok(())
    }

    fn retrieve(&self, key: &str) -> Result<Option<String>> {
        let path = self.secret_path(key)?;

        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let text = String::from_utf8(raw)
            .map_err(|_| KeystashError::InvalidEnvelope("secret file is not valid text".into()))?;

        format::open(&self.master_key, &text)
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.secret_path(key)?;
        if fsutil::remove_if_exists(&path)? {
            debug!(file = %path.display(), "deleted secret");
        }
        Ok(())
    }

    /// Checks for the secret file without decrypting it.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.secret_path(key)?.try_exists()?)
    }
}
