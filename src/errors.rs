use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Lockbox.
#[derive(Debug, Error)]
pub enum LockboxError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Low-level AEAD open failure. Never shown to the user directly:
    /// `Session::unlock` wraps it into `AuthenticationFailed` so wrong
    /// passphrases and tampered files are indistinguishable.
    #[error("Integrity check failed — wrong key or corrupted data")]
    IntegrityFailure,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Authentication failed — wrong passphrase or corrupted vault")]
    AuthenticationFailed,

    #[error("Passphrase must be at least {min} characters")]
    WeakPassphrase { min: usize },

    // --- Vault errors ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Invalid vault file: {0}")]
    MalformedVaultFile(String),

    #[error("Vault is locked")]
    VaultLocked,

    #[error("No secret at index {0}")]
    SecretNotFound(usize),

    #[error("No category with id {0}")]
    InvalidCategory(u32),

    #[error("Category is referenced by {count} secret(s) and cannot be deleted")]
    CategoryInUse { count: usize },

    #[error("Empty search query")]
    EmptySearch,

    /// The in-memory vault mutated but the save failed. The change is still
    /// live in memory and will be lost on exit unless a later save succeeds.
    #[error("Failed to persist vault (your change may be lost on restart): {0}")]
    Persistence(String),

    // --- Clipboard errors ---
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for Lockbox results.
pub type Result<T> = std::result::Result<T, LockboxError>;
