//! Zeroizing wrapper around the in-memory master key.

use zeroize::Zeroize;

/// Length of the master key in bytes (AES-256).
const KEY_LEN: usize = 32;

/// A wrapper around a 32-byte master key that automatically zeroes
/// its memory when dropped.
///
/// The session holds exactly one of these while unlocked; dropping it
/// (on lock, idle timeout, or process exit) scrubs the key material.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    /// Create a new `MasterKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to pass to `encrypt`/`decrypt`).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}
