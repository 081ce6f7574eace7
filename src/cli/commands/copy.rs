//! `lockbox copy` — copy a secret to the clipboard with a timed,
//! signature-checked clear.

use std::sync::{Arc, Mutex};

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::clipboard::{spawn_clear_timer, ClipboardGuard, SystemClipboard};
use crate::errors::{LockboxError, Result};

/// Execute the `copy` command.
///
/// Blocks until the clear timer fires.  If the user copied something
/// else in the meantime, the newer content is left alone.
pub fn execute(cli: &Cli, index: usize, login: bool) -> Result<()> {
    let (mut session, settings) = open_session(cli)?;

    let item = session.get_secret(index)?;
    let (value, what) = if login {
        (item.login.clone(), "login")
    } else {
        (item.password.clone(), "password")
    };

    let mut guard = ClipboardGuard::new(SystemClipboard::new()?);
    guard.copy(&value)?;
    // The copy counts as activity on the session.
    session.activity();

    let ttl = settings.clipboard_ttl();
    output::success(&format!("The {what} has been copied to the clipboard."));
    output::info(&format!(
        "Clearing the clipboard in {} seconds...",
        ttl.as_secs()
    ));

    let guard = Arc::new(Mutex::new(guard));
    let cleared = spawn_clear_timer(Arc::clone(&guard), ttl)
        .join()
        .map_err(|_| LockboxError::Clipboard("clear timer thread panicked".into()))?;

    if cleared {
        output::info("Clipboard cleared.");
    } else {
        output::info("Clipboard changed in the meantime — left untouched.");
    }

    Ok(())
}
