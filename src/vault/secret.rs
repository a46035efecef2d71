//! Secret identifiers and their on-disk file names.
//!
//! Callers name secrets with arbitrary strings (`"api_token"`,
//! `"auth/github"`).  Identifiers made only of `[A-Za-z0-9._-]` are
//! used as the file stem unchanged.  Anything else is sanitized, with
//! every unsafe character replaced by `_`, and suffixed with
//! `~<sha256 prefix>` of the raw identifier.  `~` never survives
//! sanitization, so `"a/b"` and `"a_b"` cannot share a file.
//!
//! Identifiers of any length are accepted.  Long ones keep only the
//! first `MAX_PLAIN_STEM_LEN` sanitized characters before the hash, so
//! every file name stays under the usual 255-byte filesystem limit.

use sha2::{Digest, Sha256};

use crate::errors::{KeystashError, Result};

/// Suffix of every secret file.
pub const SECRET_FILE_EXTENSION: &str = "bin";

/// Longest stem used verbatim; longer identifiers are truncated and hashed.
pub const MAX_PLAIN_STEM_LEN: usize = 200;

/// Bytes of SHA-256 kept in hashed file stems (32 hex chars).
const HASH_PREFIX_LEN: usize = 16;

fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if is_safe(c) { c } else { '_' })
        .collect()
}

/// Reject identifiers that cannot be stored.
pub fn validate_secret_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(KeystashError::InvalidSecretName(
            "secret name cannot be empty".into(),
        ));
    }
    Ok(())
}

/// Map a caller identifier to the stem of its secret file.
pub fn file_stem(name: &str) -> Result<String> {
    validate_secret_name(name)?;

    let mut sanitized = sanitize(name);
    if sanitized == name && sanitized.len() <= MAX_PLAIN_STEM_LEN {
        return Ok(sanitized);
    }
    // Sanitized stems are ASCII, so any byte index is a char boundary.
    sanitized.truncate(MAX_PLAIN_STEM_LEN);

    let digest = Sha256::digest(name.as_bytes());
    let hash: String = digest[..HASH_PREFIX_LEN]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect();
    Ok(format!("{sanitized}~{hash}"))
}

/// Full file name (stem plus extension) for a caller identifier.
pub fn file_name(name: &str) -> Result<String> {
    Ok(format!("{}.{SECRET_FILE_EXTENSION}", file_stem(name)?))
}
