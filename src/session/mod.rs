//! The vault session: lock/unlock state machine, idle auto-lock, and
//! master-key rotation.
//!
//! A `Session` is the only owner of the decrypted vault and the live
//! master key.  Both exist in memory exclusively between a successful
//! `unlock` and the next transition to locked (explicit `lock`, idle
//! timeout, or drop), and are zeroized on every such transition.
//!
//! Every mutating operation re-encrypts and rewrites the whole vault
//! file under a fresh nonce.  A failed save keeps the in-memory change
//! and surfaces `Persistence` — the caller decides whether to retry.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Weak};
use std::thread;
use std::time::{Duration, Instant};

use zeroize::Zeroize;

use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::kdf::{
    derive_master_key_with_params, ensure_passphrase_strength, generate_salt, Argon2Params,
    SALT_LEN,
};
use crate::crypto::keys::MasterKey;
use crate::errors::{LockboxError, Result};
use crate::vault::format::{read_vault, write_vault, VaultFile};
use crate::vault::item::{Category, SecretItem, Vault};
use crate::vault::repository::FieldEdit;

/// Knobs the session needs beyond the vault path.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Inactivity window before the session locks itself.
    pub idle_ttl: Duration,
    /// Argon2id cost used when creating a vault or rotating its key.
    /// Unlocking always uses the params stored in the file.
    pub kdf_params: Argon2Params,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::from_secs(90),
            kdf_params: Argon2Params::default(),
        }
    }
}

/// Everything that only exists while unlocked.
struct Unlocked {
    vault: Vault,
    key: MasterKey,
    /// Salt and KDF params currently written in the file, needed to
    /// re-save without re-deriving.
    salt: [u8; SALT_LEN],
    params: Argon2Params,
}

enum State {
    Locked,
    Unlocked(Unlocked),
}

/// The lock state machine.  Starts `Locked`; returns to `Locked` any
/// number of times.
pub struct Session {
    path: PathBuf,
    config: SessionConfig,
    state: State,
    last_activity: Instant,
}

impl Session {
    /// A locked session for an existing (or future) vault file.
    pub fn new(path: PathBuf, config: SessionConfig) -> Self {
        Self {
            path,
            config,
            state: State::Locked,
            last_activity: Instant::now(),
        }
    }

    /// Create a brand-new vault file and return an unlocked session.
    ///
    /// Fails with `VaultAlreadyExists` if the file is present and with
    /// `WeakPassphrase` below the minimum length.
    pub fn create(path: PathBuf, passphrase: &str, config: SessionConfig) -> Result<Self> {
        if path.exists() {
            return Err(LockboxError::VaultAlreadyExists(path));
        }
        ensure_passphrase_strength(passphrase)?;

        let salt = generate_salt();
        let params = config.kdf_params;
        let key = MasterKey::new(derive_master_key_with_params(
            passphrase.as_bytes(),
            &salt,
            &params,
        )?);

        let vault = Vault::new();
        persist(&path, &vault, &key, &salt, &params)?;

        Ok(Self {
            path,
            config,
            state: State::Unlocked(Unlocked {
                vault,
                key,
                salt,
                params,
            }),
            last_activity: Instant::now(),
        })
    }

    // ------------------------------------------------------------------
    // State transitions
    // ------------------------------------------------------------------

    /// Unlock the vault with the master passphrase.
    ///
    /// Wrong passphrase and tampered/corrupted ciphertext are deliberately
    /// indistinguishable: both surface as `AuthenticationFailed` and the
    /// session stays locked.  Sessions still inside their idle window just
    /// refresh the deadline; past it, the session locks first so the
    /// passphrase is always re-verified.
    pub fn unlock(&mut self, passphrase: &str) -> Result<()> {
        self.check_idle();
        if matches!(self.state, State::Unlocked(_)) {
            self.last_activity = Instant::now();
            return Ok(());
        }

        let file = read_vault(&self.path)?;
        let key = MasterKey::new(derive_master_key_with_params(
            passphrase.as_bytes(),
            &file.salt,
            &file.params,
        )?);

        let mut plaintext = decrypt(key.as_bytes(), &file.sealed)
            .map_err(|_| LockboxError::AuthenticationFailed)?;

        let vault: Vault = match serde_json::from_slice(&plaintext) {
            Ok(v) => v,
            Err(e) => {
                plaintext.zeroize();
                return Err(LockboxError::MalformedVaultFile(format!(
                    "vault payload: {e}"
                )));
            }
        };
        plaintext.zeroize();

        self.state = State::Unlocked(Unlocked {
            vault,
            key,
            salt: file.salt,
            params: file.params,
        });
        self.last_activity = Instant::now();
        Ok(())
    }

    /// Lock the session, scrubbing the decrypted vault and the key.
    pub fn lock(&mut self) {
        if let State::Unlocked(mut inner) = std::mem::replace(&mut self.state, State::Locked) {
            inner.vault.zeroize();
            // `inner.key` zeroizes on drop.
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self.state, State::Unlocked(_))
    }

    /// Reset the idle deadline.  Called at the start of every operation;
    /// external collaborators (e.g. the clipboard layer) may also call it.
    pub fn activity(&mut self) {
        self.last_activity = Instant::now();
    }

    /// Lock now if the idle TTL has elapsed.  Returns the resulting
    /// unlocked-ness.  The background watcher calls this periodically;
    /// every foreground operation also calls it on entry, so the vault is
    /// never usable past the deadline regardless of watcher cadence.
    pub fn check_idle(&mut self) -> bool {
        if self.is_unlocked() && self.last_activity.elapsed() >= self.config.idle_ttl {
            self.lock();
        }
        self.is_unlocked()
    }

    /// Idle check + activity refresh common to every operation.
    fn begin_op(&mut self) -> Result<()> {
        self.check_idle();
        self.last_activity = Instant::now();
        if self.is_unlocked() {
            Ok(())
        } else {
            Err(LockboxError::VaultLocked)
        }
    }

    /// Borrow the unlocked state only (disjoint from `self.path`).
    fn unlocked_mut(state: &mut State) -> Result<&mut Unlocked> {
        match state {
            State::Unlocked(inner) => Ok(inner),
            State::Locked => Err(LockboxError::VaultLocked),
        }
    }

    // ------------------------------------------------------------------
    // Read operations
    // ------------------------------------------------------------------

    /// Get a secret by index (cloned; the caller owns the copy and it
    /// zeroizes on drop).
    pub fn get_secret(&mut self, index: usize) -> Result<SecretItem> {
        self.begin_op()?;
        let inner = Self::unlocked_mut(&mut self.state)?;
        inner.vault.get_secret(index).cloned()
    }

    /// All secrets with their current indices.
    pub fn list_secrets(&mut self) -> Result<Vec<(usize, SecretItem)>> {
        self.begin_op()?;
        let inner = Self::unlocked_mut(&mut self.state)?;
        Ok(inner.vault.secrets.iter().cloned().enumerate().collect())
    }

    /// Case-insensitive substring search; see `Vault::search`.
    pub fn search(&mut self, query: &str) -> Result<Vec<(usize, SecretItem)>> {
        self.begin_op()?;
        let inner = Self::unlocked_mut(&mut self.state)?;
        let hits = inner.vault.search(query)?;
        Ok(hits.into_iter().map(|(i, item)| (i, item.clone())).collect())
    }

    /// All categories in creation order.
    pub fn categories(&mut self) -> Result<Vec<Category>> {
        self.begin_op()?;
        let inner = Self::unlocked_mut(&mut self.state)?;
        Ok(inner.vault.categories.clone())
    }

    /// Resolve a category name by id.
    pub fn category_name(&mut self, id: u32) -> Result<Option<String>> {
        self.begin_op()?;
        let inner = Self::unlocked_mut(&mut self.state)?;
        Ok(inner.vault.category_name(id).map(str::to_string))
    }

    // ------------------------------------------------------------------
    // Mutating operations — each one persists the whole vault
    // ------------------------------------------------------------------

    pub fn add_category(&mut self, name: &str) -> Result<u32> {
        self.begin_op()?;
        let inner = Self::unlocked_mut(&mut self.state)?;
        let id = inner.vault.add_category(name);
        persist_inner(&self.path, inner)?;
        Ok(id)
    }

    pub fn delete_category(&mut self, id: u32) -> Result<()> {
        self.begin_op()?;
        let inner = Self::unlocked_mut(&mut self.state)?;
        inner.vault.delete_category(id)?;
        persist_inner(&self.path, inner)
    }

    pub fn add_secret(&mut self, item: SecretItem) -> Result<usize> {
        self.begin_op()?;
        let inner = Self::unlocked_mut(&mut self.state)?;
        let index = inner.vault.add_secret(item)?;
        persist_inner(&self.path, inner)?;
        Ok(index)
    }

    pub fn edit_secret(&mut self, index: usize, edit: FieldEdit) -> Result<()> {
        self.begin_op()?;
        let inner = Self::unlocked_mut(&mut self.state)?;
        inner.vault.edit_secret(index, edit)?;
        persist_inner(&self.path, inner)
    }

    /// Delete the secret at `index`.  Indices above it shift down by one.
    pub fn delete_secret(&mut self, index: usize) -> Result<()> {
        self.begin_op()?;
        let inner = Self::unlocked_mut(&mut self.state)?;
        inner.vault.delete_secret(index)?;
        persist_inner(&self.path, inner)
    }

    // ------------------------------------------------------------------
    // Key rotation
    // ------------------------------------------------------------------

    /// Re-encrypt the vault under a key derived from `new_passphrase`
    /// with a brand-new salt.
    ///
    /// The new file is written (atomically) **before** the old key is
    /// discarded, so a failure at any point leaves the old, still-valid
    /// file on disk and the old key live in memory.  Requires the session
    /// to be unlocked; callers run their normal unlock flow first.
    pub fn rotate_key(&mut self, new_passphrase: &str) -> Result<()> {
        ensure_passphrase_strength(new_passphrase)?;
        let kdf_params = self.config.kdf_params;
        self.begin_op()?;
        let inner = Self::unlocked_mut(&mut self.state)?;

        let new_salt = generate_salt();
        let new_key = MasterKey::new(derive_master_key_with_params(
            new_passphrase.as_bytes(),
            &new_salt,
            &kdf_params,
        )?);

        persist(&self.path, &inner.vault, &new_key, &new_salt, &kdf_params)?;

        // Only after the new file is safely on disk: swap the live key.
        // The old key zeroizes as it is dropped.
        inner.key = new_key;
        inner.salt = new_salt;
        inner.params = kdf_params;
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.lock();
    }
}

// ----------------------------------------------------------------------
// Persistence helpers
// ----------------------------------------------------------------------

fn persist_inner(path: &Path, inner: &Unlocked) -> Result<()> {
    persist(path, &inner.vault, &inner.key, &inner.salt, &inner.params)
}

/// Serialize, encrypt under a fresh nonce, and atomically write the vault.
///
/// All failures surface as `Persistence`: the in-memory vault is already
/// mutated and is intentionally not rolled back.
fn persist(
    path: &Path,
    vault: &Vault,
    key: &MasterKey,
    salt: &[u8; SALT_LEN],
    params: &Argon2Params,
) -> Result<()> {
    let mut plaintext = serde_json::to_vec(vault)
        .map_err(|e| LockboxError::Persistence(format!("serialize: {e}")))?;

    let sealed = encrypt(key.as_bytes(), &plaintext);
    plaintext.zeroize();
    let sealed = sealed.map_err(|e| LockboxError::Persistence(e.to_string()))?;

    let file = VaultFile {
        params: *params,
        salt: *salt,
        sealed,
    };
    write_vault(path, &file).map_err(|e| LockboxError::Persistence(e.to_string()))
}

// ----------------------------------------------------------------------
// Background idle watcher
// ----------------------------------------------------------------------

/// Spawn a background thread that locks the session once the idle TTL
/// elapses.  Holds only a `Weak` reference, so the thread winds down on
/// its next tick after the session is dropped.
pub fn spawn_idle_watcher(session: &Arc<Mutex<Session>>) -> thread::JoinHandle<()> {
    let weak: Weak<Mutex<Session>> = Arc::downgrade(session);
    let interval = watcher_interval(session);

    thread::spawn(move || loop {
        thread::sleep(interval);
        let Some(strong) = weak.upgrade() else {
            break;
        };
        let Ok(mut session) = strong.lock() else {
            break;
        };
        session.check_idle();
    })
}

/// Check cadence: a quarter of the TTL, clamped between 10 ms and 1 s.
/// The vault can therefore never stay unlocked longer than TTL plus one
/// interval, even if no foreground operation runs.
fn watcher_interval(session: &Arc<Mutex<Session>>) -> Duration {
    let ttl = session
        .lock()
        .map(|s| s.config.idle_ttl)
        .unwrap_or(Duration::from_secs(90));
    (ttl / 4).clamp(Duration::from_millis(10), Duration::from_secs(1))
}
