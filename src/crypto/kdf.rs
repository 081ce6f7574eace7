//! Passphrase-based key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF, so offline guessing against a stolen
//! vault file stays expensive even on GPU rigs.  Parameters are
//! configurable via `Argon2Params` (loaded from `.lockbox.toml` or
//! sensible defaults) and are stored in the vault file header so
//! unlocking always uses the cost the file was written with.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

use crate::errors::{LockboxError, Result};

/// Length of the salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Length of the derived key in bytes (256 bits, for AES-256).
const KEY_LEN: usize = 32;

/// Minimum master passphrase length.
///
/// Enforced when a vault is created and when the key is rotated —
/// never on unlock, where the stored file is the only authority.
pub const MIN_PASSPHRASE_LEN: usize = 8;

/// Configurable Argon2id parameters.
///
/// These map 1:1 to the fields in `Settings` so the CLI can pass
/// whatever the user configured in `.lockbox.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Derive a 32-byte master key with explicit Argon2id parameters.
///
/// The same passphrase + salt + params will always produce the same key.
/// Enforces minimum Argon2 parameters to prevent dangerously weak KDF settings.
pub fn derive_master_key_with_params(
    passphrase: &[u8],
    salt: &[u8],
    argon2_params: &Argon2Params,
) -> Result<[u8; KEY_LEN]> {
    if argon2_params.memory_kib < MIN_MEMORY_KIB {
        return Err(LockboxError::KeyDerivationFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            argon2_params.memory_kib
        )));
    }
    if argon2_params.iterations < 1 {
        return Err(LockboxError::KeyDerivationFailed(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if argon2_params.parallelism < 1 {
        return Err(LockboxError::KeyDerivationFailed(
            "Argon2 parallelism must be at least 1".into(),
        ));
    }

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| LockboxError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(passphrase, salt, &mut key)
        .map_err(|e| LockboxError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

/// Reject passphrases shorter than `MIN_PASSPHRASE_LEN` characters.
pub fn ensure_passphrase_strength(passphrase: &str) -> Result<()> {
    if passphrase.chars().count() < MIN_PASSPHRASE_LEN {
        return Err(LockboxError::WeakPassphrase {
            min: MIN_PASSPHRASE_LEN,
        });
    }
    Ok(())
}
