//! Plaintext data model: categories, secret items, and the decrypted vault.
//!
//! These types only ever exist in memory while the session is unlocked.
//! They all derive `Zeroize` so the session can scrub them on lock, and
//! `ZeroizeOnDrop` as a backstop for the process-exit path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A named grouping for secrets.
///
/// Ids are ordinal, assigned once and never reused, so a `category_id`
/// stored on a secret stays a valid reference for the life of the vault.
#[derive(Debug, Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

/// A single stored credential.
///
/// Secrets are addressed by their position in the vault's ordered list.
/// That index is **not stable across deletions**: removing index `k`
/// shifts every later secret down by one.
#[derive(Debug, Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct SecretItem {
    /// Reference to a `Category` id, or `None` for uncategorized.
    pub category_id: Option<u32>,
    /// Display name or URL (e.g. "github.com").
    pub name: String,
    /// Login / username.
    pub login: String,
    /// The password itself.
    pub password: String,
    /// Free-form multi-line notes.
    pub notes: String,
}

/// The decrypted vault contents.
///
/// Owned exclusively by the session while unlocked; every mutation is
/// followed by a full re-encrypt-and-write of the whole structure.
#[derive(Debug, Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Vault {
    pub categories: Vec<Category>,
    pub secrets: Vec<SecretItem>,
    /// When the vault was first created.
    #[zeroize(skip)]
    pub created_at: DateTime<Utc>,
}

impl Vault {
    /// An empty vault, timestamped now.
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            secrets: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

impl Default for Vault {
    fn default() -> Self {
        Self::new()
    }
}
