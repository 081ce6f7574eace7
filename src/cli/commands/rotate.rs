//! `lockbox rotate-key` — change the vault master passphrase.
//!
//! Unlocks with the current passphrase, generates a new salt, derives a
//! new key from the new passphrase, and re-encrypts the whole vault.
//! The new file is written atomically before the old key is discarded,
//! so an interrupted rotation always leaves a file the old passphrase
//! still opens.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::crypto::kdf::MIN_PASSPHRASE_LEN;
use crate::errors::{LockboxError, Result};

/// Execute the `rotate-key` command.
pub fn execute(cli: &Cli) -> Result<()> {
    output::info("Enter your current master passphrase.");
    let (mut session, _settings) = open_session(cli)?;

    output::info("Choose your new master passphrase.");
    let new_passphrase = prompt_rotation_passphrase()?;

    session.rotate_key(&new_passphrase)?;

    output::success("Master passphrase rotated — the vault was re-encrypted under the new key.");
    Ok(())
}

/// New passphrase for rotation: `LOCKBOX_NEW_PASSPHRASE` env var for
/// scripted use, otherwise an interactive confirmed prompt.
fn prompt_rotation_passphrase() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("LOCKBOX_NEW_PASSPHRASE") {
        if !pw.is_empty() {
            if pw.chars().count() < MIN_PASSPHRASE_LEN {
                return Err(LockboxError::WeakPassphrase {
                    min: MIN_PASSPHRASE_LEN,
                });
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("New master passphrase")
        .with_confirmation(
            "Confirm new master passphrase",
            "Passphrases do not match, try again",
        )
        .interact()
        .map_err(|e| LockboxError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}
