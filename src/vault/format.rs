//! Per-secret envelope format.
//!
//! Each secret file holds the standard base64 encoding of:
//!
//! ```text
//! [version: 1 byte][nonce: 12 bytes][ciphertext + GCM tag: N + 16 bytes]
//! ```
//!
//! - **Version**: format version (currently `1`).  Readers that meet a
//!   version they do not understand report the secret as absent.
//! - **Nonce**: fresh random value for every seal.
//! - **Ciphertext + tag**: AES-256-GCM output under the master key.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::warn;
use zeroize::Zeroize;

use crate::crypto::encryption::{self, NONCE_LEN, TAG_LEN};
use crate::crypto::MasterKey;
use crate::errors::{KeystashError, Result};

/// Current envelope format version.
pub const CURRENT_VERSION: u8 = 1;

/// Smallest valid envelope: version + nonce + tag over an empty value.
pub const MIN_ENVELOPE_LEN: usize = 1 + NONCE_LEN + TAG_LEN;

/// Encrypt `plaintext` and return the base64 text written to disk.
pub fn seal(key: &MasterKey, plaintext: &str) -> Result<String> {
    let body = encryption::encrypt(key.as_bytes(), plaintext.as_bytes())?;

    let mut buf = Vec::with_capacity(1 + body.len());
    buf.push(CURRENT_VERSION);
    buf.extend_from_slice(&body);

    Ok(BASE64.encode(&buf))
}

/// Decode and decrypt an envelope read from disk.
///
/// Returns `Ok(None)` when the envelope uses a version this build does
/// not understand.  Malformed base64, truncation and authentication
/// failures are errors scoped to this one secret.
pub fn open(key: &MasterKey, encoded: &str) -> Result<Option<String>> {
    let data = BASE64
        .decode(encoded.trim())
        .map_err(|e| KeystashError::InvalidEnvelope(format!("invalid base64: {e}")))?;

    if data.len() < MIN_ENVELOPE_LEN {
        return Err(KeystashError::InvalidEnvelope(format!(
            "envelope is {} bytes, need at least {MIN_ENVELOPE_LEN}",
            data.len()
        )));
    }

    let (version, body) = (data[0], &data[1..]);
    match version {
        1 => open_v1(key, body).map(Some),
        other => {
            warn!(version = other, "skipping secret with unknown envelope version");
            Ok(None)
        }
    }
}

/// Read the version byte of an envelope without decrypting it.
pub fn version_of(encoded: &str) -> Result<u8> {
    let data = BASE64
        .decode(encoded.trim())
        .map_err(|e| KeystashError::InvalidEnvelope(format!("invalid base64: {e}")))?;
    data.first()
        .copied()
        .ok_or_else(|| KeystashError::InvalidEnvelope("envelope is empty".into()))
}

fn open_v1(key: &MasterKey, body: &[u8]) -> Result<String> {
    let plaintext = encryption::decrypt(key.as_bytes(), body)?;

    String::from_utf8(plaintext).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        KeystashError::InvalidEnvelope("secret value is not valid UTF-8".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> MasterKey {
        MasterKey::new([0x42; 32])
    }

    fn reencode_with_version(encoded: &str, version: u8) -> String {
        let mut raw = BASE64.decode(encoded).unwrap();
        raw[0] = version;
        BASE64.encode(raw)
    }

    #[test]
    fn seal_then_open() {
        let sealed = seal(&key(), "secret123").unwrap();
        assert_eq!(open(&key(), &sealed).unwrap().as_deref(), Some("secret123"));
    }

    #[test]
    fn layout_starts_with_version_byte() {
        let sealed = seal(&key(), "abc").unwrap();
        let raw = BASE64.decode(&sealed).unwrap();
        assert_eq!(raw[0], CURRENT_VERSION);
        assert_eq!(raw.len(), MIN_ENVELOPE_LEN + 3);
        assert_eq!(version_of(&sealed).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn each_seal_uses_a_fresh_nonce() {
        let a = BASE64.decode(seal(&key(), "same").unwrap()).unwrap();
        let b = BASE64.decode(seal(&key(), "same").unwrap()).unwrap();
        assert_ne!(&a[1..1 + NONCE_LEN], &b[1..1 + NONCE_LEN]);
    }

    #[test]
    fn unknown_version_reads_as_absent() {
        let sealed = seal(&key(), "v").unwrap();
        for version in [0u8, 2, 0xFF] {
            let altered = reencode_with_version(&sealed, version);
            assert_eq!(open(&key(), &altered).unwrap(), None);
        }
    }

    #[test]
    fn short_envelope_is_an_error_even_with_unknown_version() {
        let short = BASE64.encode([2u8; MIN_ENVELOPE_LEN - 1]);
        assert!(matches!(
            open(&key(), &short),
            Err(KeystashError::InvalidEnvelope(_))
        ));
    }

    #[test]
    fn malformed_base64_is_an_error() {
        assert!(matches!(
            open(&key(), "%%% not base64 %%%"),
            Err(KeystashError::InvalidEnvelope(_))
        ));
    }

    #[test]
    fn tampered_ciphertext_fails_authentication() {
        let sealed = seal(&key(), "payload").unwrap();
        let mut raw = BASE64.decode(&sealed).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;

        let result = open(&key(), &BASE64.encode(raw));
        assert!(matches!(result, Err(KeystashError::DecryptionFailed)));
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let sealed = seal(&key(), "payload").unwrap();
        let other = MasterKey::new([0x43; 32]);
        assert!(matches!(
            open(&other, &sealed),
            Err(KeystashError::DecryptionFailed)
        ));
    }

    #[test]
    fn empty_value_round_trips() {
        let sealed = seal(&key(), "").unwrap();
        assert_eq!(open(&key(), &sealed).unwrap().as_deref(), Some(""));
    }
}
