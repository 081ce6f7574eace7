//! `lockbox init` — create a new vault.

use std::fs;

use crate::cli::output;
use crate::cli::{prompt_new_passphrase, session_config, vault_path, Cli};
use crate::config::Settings;
use crate::errors::{LockboxError, Result};
use crate::session::Session;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let path = vault_path(cli, &settings)?;

    if let Some(vault_dir) = path.parent() {
        if !vault_dir.exists() {
            fs::create_dir_all(vault_dir)?;
            output::info(&format!("Created vault directory: {}", vault_dir.display()));
        }
    }

    if path.exists() {
        output::tip("Use `lockbox add` to add secrets to the existing vault.");
        return Err(LockboxError::VaultAlreadyExists(path));
    }

    let passphrase = prompt_new_passphrase()?;
    Session::create(path.clone(), &passphrase, session_config(&settings))?;

    output::success(&format!("Vault created at {}", path.display()));
    output::tip("Run `lockbox add <name>` to add a secret.");
    output::tip("Run `lockbox list` to see all secrets.");

    Ok(())
}
