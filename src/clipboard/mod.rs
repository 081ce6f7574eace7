//! Clipboard hygiene: copy a secret, then clear it later only if the
//! clipboard still holds that secret.
//!
//! A SHA-256 fingerprint of the copied text is kept instead of the text
//! itself.  When the scheduled clear fires, the clipboard is re-read and
//! compared against the fingerprint: if the user has since copied
//! something else, the clear is a no-op so newer content is never
//! clobbered.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use sha2::{Digest, Sha256};

use crate::errors::{LockboxError, Result};

/// Minimal clipboard seam so tests can run against an in-memory fake
/// while the binary uses the OS clipboard.
pub trait Clipboard: Send {
    fn get_text(&mut self) -> Result<String>;
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The real OS clipboard, via `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| LockboxError::Clipboard(format!("cannot open clipboard: {e}")))?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Result<String> {
        self.inner
            .get_text()
            .map_err(|e| LockboxError::Clipboard(format!("read failed: {e}")))
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| LockboxError::Clipboard(format!("write failed: {e}")))
    }
}

/// SHA-256 fingerprint of clipboard text.
pub fn signature(text: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.finalize().into()
}

/// Owns a clipboard backend plus the fingerprint of the last copy.
pub struct ClipboardGuard<C: Clipboard> {
    clipboard: C,
    last_signature: Option<[u8; 32]>,
}

impl<C: Clipboard> ClipboardGuard<C> {
    pub fn new(clipboard: C) -> Self {
        Self {
            clipboard,
            last_signature: None,
        }
    }

    /// Copy `value` to the clipboard and remember its fingerprint.
    pub fn copy(&mut self, value: &str) -> Result<()> {
        self.clipboard.set_text(value)?;
        self.last_signature = Some(signature(value));
        Ok(())
    }

    /// Clear the clipboard if it still holds the last copied value.
    ///
    /// Returns `true` if the clipboard was cleared.  The pending
    /// fingerprint is consumed either way, and a clipboard that cannot be
    /// read (emptied or holding non-text content) is treated as changed.
    pub fn clear_if_unchanged(&mut self) -> Result<bool> {
        let Some(expected) = self.last_signature.take() else {
            return Ok(false);
        };

        let current = match self.clipboard.get_text() {
            Ok(text) => text,
            Err(_) => return Ok(false),
        };

        if signature(&current) != expected {
            return Ok(false);
        }

        self.clipboard.set_text("")?;
        Ok(true)
    }

    /// True if a copy is awaiting its scheduled clear.
    pub fn has_pending_clear(&self) -> bool {
        self.last_signature.is_some()
    }
}

/// Schedule a signature-checked clear `ttl` from now on a background
/// thread.  The guard is shared behind a mutex so the clear serializes
/// against any foreground clipboard use.  Joining the handle yields
/// whether the clipboard was actually cleared.
pub fn spawn_clear_timer<C>(
    guard: Arc<Mutex<ClipboardGuard<C>>>,
    ttl: Duration,
) -> thread::JoinHandle<bool>
where
    C: Clipboard + 'static,
{
    thread::spawn(move || {
        thread::sleep(ttl);
        match guard.lock() {
            Ok(mut guard) => guard.clear_if_unchanged().unwrap_or(false),
            Err(_) => false,
        }
    })
}
