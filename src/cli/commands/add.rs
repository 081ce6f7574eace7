//! `lockbox add` — add a secret to the vault.

use std::io::{self, IsTerminal, Read};

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::Result;
use crate::vault::SecretItem;

/// Execute the `add` command.
pub fn execute(cli: &Cli, name: &str, login: &str, category: Option<u32>, notes: &str) -> Result<()> {
    // Determine the password from one of two sources.
    let password = if !io::stdin().is_terminal() {
        // Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end().to_string()
    } else {
        // Interactive hidden prompt (default).
        dialoguer::Password::new()
            .with_prompt(format!("Password for {name}"))
            .interact()
            .map_err(|e| {
                crate::errors::LockboxError::CommandFailed(format!("input prompt: {e}"))
            })?
    };

    let (mut session, _settings) = open_session(cli)?;

    let index = session.add_secret(SecretItem {
        category_id: category,
        name: name.to_string(),
        login: login.to_string(),
        password,
        notes: notes.to_string(),
    })?;

    output::success(&format!("Secret '{name}' added at index {index}"));
    Ok(())
}
