use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in keystash.
#[derive(Debug, Error)]
pub enum KeystashError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong master key or tampered data")]
    DecryptionFailed,

    // --- Envelope errors ---
    #[error("Invalid secret envelope: {0}")]
    InvalidEnvelope(String),

    // --- Master key errors ---
    #[error("Master key at {path} is corrupted: {reason}")]
    MasterKeyCorrupted { path: PathBuf, reason: String },

    // --- Secret errors ---
    #[error("Invalid secret name: {0}")]
    InvalidSecretName(String),

    #[error("Secret '{0}' not found")]
    SecretNotFound(String),

    // --- Keyring errors ---
    #[error("Keyring error: {0}")]
    KeyringError(String),

    // --- Config errors ---
    #[error("Config error: {0}")]
    ConfigError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl KeystashError {
    /// Returns `true` when the master key on disk can no longer be used.
    ///
    /// Nothing stored under that key can be recovered; the only way
    /// forward is a destructive reset.
    pub fn is_corrupted_key(&self) -> bool {
        matches!(self, Self::MasterKeyCorrupted { .. })
    }

    /// Returns `true` for failures that may succeed on retry
    /// (permission denied, disk full, path unavailable).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Io(_) | Self::KeyringError(_))
    }
}

/// Convenience type alias for keystash results.
pub type Result<T> = std::result::Result<T, KeystashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupted_key_is_not_transient() {
        let err = KeystashError::MasterKeyCorrupted {
            path: PathBuf::from("/tmp/master.key"),
            reason: "file is empty".into(),
        };
        assert!(err.is_corrupted_key());
        assert!(!err.is_transient());
        assert!(err.to_string().contains("/tmp/master.key"));
    }

    #[test]
    fn io_errors_are_transient() {
        let err: KeystashError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.is_transient());
        assert!(!err.is_corrupted_key());
    }
}
