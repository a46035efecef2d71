use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{KeystashError, Result};

/// Which secret backend the factory builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Encrypted files under the base directory.
    #[default]
    File,
    /// OS keychain (requires the `keyring-store` feature).
    Keyring,
}

/// Vault configuration, loaded from `<base>/keystash.toml`.
///
/// Every field has a sensible default so keystash works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Backend used by `create_store`.
    #[serde(default)]
    pub backend: Backend,

    /// Directory (relative to the base dir) holding secret files.
    #[serde(default = "default_secrets_dir")]
    pub secrets_dir: String,

    /// Master key file (relative to the base dir).
    #[serde(default = "default_key_file")]
    pub key_file: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_secrets_dir() -> String {
    "secrets".to_string()
}

fn default_key_file() -> String {
    "keys/master.key".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            secrets_dir: default_secrets_dir(),
            key_file: default_key_file(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the base directory.
    pub const FILE_NAME: &'static str = "keystash.toml";

    /// Load settings from `<base_dir>/keystash.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let config_path = base_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        toml::from_str(&contents).map_err(|e| {
            KeystashError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })
    }

    /// Directory holding secret files, e.g. `<base>/secrets`.
    pub fn secrets_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.secrets_dir)
    }

    /// Master key file, e.g. `<base>/keys/master.key`.
    pub fn key_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.key_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.backend, Backend::File);
        assert_eq!(s.secrets_dir, "secrets");
        assert_eq!(s.key_file, "keys/master.key");
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.backend, Backend::File);
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
backend = "keyring"
secrets_dir = "vault"
key_file = "private/root.key"
"#;
        fs::write(tmp.path().join(Settings::FILE_NAME), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.backend, Backend::Keyring);
        assert_eq!(settings.secrets_dir, "vault");
        assert_eq!(settings.key_file, "private/root.key");
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(Settings::FILE_NAME), "secrets_dir = \"s\"\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.secrets_dir, "s");
        assert_eq!(settings.backend, Backend::File);
        assert_eq!(settings.key_file, "keys/master.key");
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(Settings::FILE_NAME), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(KeystashError::ConfigError(_))));
    }

    #[test]
    fn load_errors_on_unknown_backend() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(Settings::FILE_NAME), "backend = \"s3\"\n").unwrap();

        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn paths_are_relative_to_base() {
        let s = Settings::default();
        let base = Path::new("/home/user/.keystash");
        assert_eq!(
            s.secrets_path(base),
            PathBuf::from("/home/user/.keystash/secrets")
        );
        assert_eq!(
            s.key_path(base),
            PathBuf::from("/home/user/.keystash/keys/master.key")
        );
    }
}
