//! Binary vault file format and atomic persistence.
//!
//! A `.vault` file has this layout:
//!
//! ```text
//! [LKBX: 4 bytes][version: 1 byte]
//! [argon2 memory_kib: 4 bytes LE][iterations: 4 bytes LE][parallelism: 4 bytes LE]
//! [salt: 32 bytes]
//! [nonce: 12 bytes][ciphertext: variable][auth tag: 16 bytes]
//! ```
//!
//! - **Magic** (`LKBX`): identifies the file as a Lockbox vault.
//! - **Version**: format version (currently `1`); no migration, only the
//!   current version opens.
//! - **Argon2 params**: the KDF cost the file was written with, so unlock
//!   derives the same key even if local config changed since.
//! - **Salt**: generated at vault creation, replaced only by key rotation.
//! - **Sealed body**: `nonce || ciphertext || tag` as produced by
//!   `crypto::encryption::encrypt`.  Every field except the ciphertext is
//!   fixed-size, so `read_vault` can always split them unambiguously.

use std::fs;
use std::path::Path;

use crate::crypto::encryption::{NONCE_LEN, TAG_LEN};
use crate::crypto::kdf::{Argon2Params, SALT_LEN};
use crate::errors::{LockboxError, Result};

/// Magic bytes at the start of every vault file.
const MAGIC: &[u8; 4] = b"LKBX";

/// Current binary format version.
pub const CURRENT_VERSION: u8 = 1;

/// Fixed-size prefix: 4 (magic) + 1 (version) + 12 (argon2 params).
const PREFIX_LEN: usize = 17;

/// Everything that comes before the sealed body.
const HEADER_LEN: usize = PREFIX_LEN + SALT_LEN;

/// The on-disk representation of a vault, parsed but not decrypted.
#[derive(Debug, Clone)]
pub struct VaultFile {
    /// Argon2id cost parameters used to derive this vault's key.
    pub params: Argon2Params,
    /// The key-derivation salt.
    pub salt: [u8; SALT_LEN],
    /// `nonce || ciphertext || tag` — opaque to this layer.
    pub sealed: Vec<u8>,
}

/// Write a vault file to disk **atomically**.
///
/// Writes to a temp file in the same directory, then renames it over the
/// target path, so a crash mid-write can never leave a half-written vault.
pub fn write_vault(path: &Path, file: &VaultFile) -> Result<()> {
    let mut buf = Vec::with_capacity(HEADER_LEN + file.sealed.len());

    buf.extend_from_slice(MAGIC); // 4 bytes
    buf.push(CURRENT_VERSION); // 1 byte
    buf.extend_from_slice(&file.params.memory_kib.to_le_bytes()); // 4 bytes LE
    buf.extend_from_slice(&file.params.iterations.to_le_bytes()); // 4 bytes LE
    buf.extend_from_slice(&file.params.parallelism.to_le_bytes()); // 4 bytes LE
    buf.extend_from_slice(&file.salt); // 32 bytes
    buf.extend_from_slice(&file.sealed); // nonce + ciphertext + tag

    // The temp file lives in the same directory so the rename is
    // guaranteed to be atomic on the same filesystem.
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, &buf)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

/// Read and parse a vault file from disk.
///
/// Only splits the fields — authenticating and decrypting the sealed body
/// is the caller's job.
pub fn read_vault(path: &Path) -> Result<VaultFile> {
    if !path.exists() {
        return Err(LockboxError::VaultNotFound(path.to_path_buf()));
    }

    let data = fs::read(path)?;

    // Minimum size: header + nonce + tag of an empty vault.
    if data.len() < HEADER_LEN + NONCE_LEN + TAG_LEN {
        return Err(LockboxError::MalformedVaultFile(
            "file too small to be a valid vault".into(),
        ));
    }

    if &data[0..4] != MAGIC {
        return Err(LockboxError::MalformedVaultFile(
            "missing LKBX magic bytes".into(),
        ));
    }

    let version = data[4];
    if version != CURRENT_VERSION {
        return Err(LockboxError::MalformedVaultFile(format!(
            "unsupported version {version}, expected {CURRENT_VERSION}"
        )));
    }

    let params = Argon2Params {
        memory_kib: read_u32_le(&data[5..9])?,
        iterations: read_u32_le(&data[9..13])?,
        parallelism: read_u32_le(&data[13..17])?,
    };

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&data[PREFIX_LEN..HEADER_LEN]);

    let sealed = data[HEADER_LEN..].to_vec();

    Ok(VaultFile {
        params,
        salt,
        sealed,
    })
}

fn read_u32_le(bytes: &[u8]) -> Result<u32> {
    let arr: [u8; 4] = bytes
        .try_into()
        .map_err(|_| LockboxError::MalformedVaultFile("bad header field".into()))?;
    Ok(u32::from_le_bytes(arr))
}
