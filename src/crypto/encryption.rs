//! AES-256-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  Callers can never supply a nonce, so
//! nonce reuse under one key is structurally impossible.  `decrypt`
//! splits the nonce back out before opening.
//!
//! Layout of the returned byte buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::errors::{LockboxError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext || tag).
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| LockboxError::EncryptionFailed(format!("invalid key length: {e}")))?;

    // Fresh random nonce for every call.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| LockboxError::EncryptionFailed(format!("encryption error: {e}")))?;

    // Prepend the nonce so the caller only needs to store one blob.
    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt data that was produced by `encrypt`.
///
/// Expects the first 12 bytes to be the nonce, followed by the ciphertext
/// and tag.  Fails with `IntegrityFailure` if the tag does not verify —
/// a wrong key, a flipped bit, or a truncated blob all land here, and no
/// plaintext is ever returned in that case.
pub fn decrypt(key: &[u8], sealed: &[u8]) -> Result<Vec<u8>> {
    // Minimum: nonce + tag of an empty plaintext.
    if sealed.len() < NONCE_LEN + TAG_LEN {
        return Err(LockboxError::IntegrityFailure);
    }

    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| LockboxError::IntegrityFailure)?;

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| LockboxError::IntegrityFailure)?;

    Ok(plaintext)
}
