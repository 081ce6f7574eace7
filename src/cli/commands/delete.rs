//! `lockbox delete` — remove a secret from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::{LockboxError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, index: usize, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete secret at index {index}?"))
            .default(false)
            .interact()
            .map_err(|e| LockboxError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let (mut session, _settings) = open_session(cli)?;
    session.delete_secret(index)?;

    output::success(&format!("Deleted secret at index {index}"));
    output::tip("Indices above the deleted one have shifted down by one.");

    Ok(())
}
