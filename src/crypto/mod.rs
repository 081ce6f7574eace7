//! Cryptographic primitives for Lockbox.
//!
//! This module provides:
//! - AES-256-GCM authenticated encryption and decryption (`encryption`)
//! - Argon2id passphrase-based key derivation (`kdf`)
//! - A zeroizing wrapper for the in-memory master key (`keys`)

pub mod encryption;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_master_key_with_params, ...};
pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_master_key_with_params, generate_salt, Argon2Params};
pub use keys::MasterKey;
