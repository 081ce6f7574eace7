//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::kdf::MIN_PASSPHRASE_LEN;
use crate::errors::{LockboxError, Result};
use crate::session::{Session, SessionConfig};

/// Lockbox CLI: local encrypted password vault.
#[derive(Parser)]
#[command(name = "lockbox", about = "Local encrypted password vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (overrides `vault_dir` from .lockbox.toml)
    #[arg(long, global = true)]
    pub vault_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new vault
    Init,

    /// Add a secret
    Add {
        /// Name or URL of the secret (e.g. github.com)
        name: String,
        /// Login / username
        #[arg(short, long, default_value = "")]
        login: String,
        /// Category id (see `lockbox category list`)
        #[arg(short, long)]
        category: Option<u32>,
        /// Free-form notes
        #[arg(short, long, default_value = "")]
        notes: String,
    },

    /// List all secrets (never shows passwords)
    List,

    /// Show one secret by index
    Show {
        /// Secret index (from `list` or `search`)
        index: usize,
        /// Print the password instead of masking it
        #[arg(long)]
        reveal: bool,
    },

    /// Search secrets by name, login, notes, or category
    Search {
        /// Case-insensitive substring to look for
        query: String,
    },

    /// Edit a single field of a secret
    Edit {
        /// Secret index (from `list` or `search`)
        index: usize,
        /// Which field to edit
        #[arg(value_enum)]
        field: FieldArg,
        /// New value (prompted when omitted; required for non-password fields)
        value: Option<String>,
    },

    /// Delete a secret (indices above it shift down by one)
    Delete {
        /// Secret index (from `list` or `search`)
        index: usize,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Copy a secret to the clipboard, clearing it after a delay
    Copy {
        /// Secret index (from `list` or `search`)
        index: usize,
        /// Copy the login instead of the password
        #[arg(long)]
        login: bool,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Change the vault's master passphrase
    RotateKey,
}

/// Category subcommands.
#[derive(clap::Subcommand)]
pub enum CategoryAction {
    /// Create a new category
    Add {
        /// Category name
        name: String,
    },

    /// List all categories
    List,
}

/// Editable secret fields, as accepted on the command line.
#[derive(Clone, Copy, clap::ValueEnum)]
pub enum FieldArg {
    Category,
    Name,
    Login,
    Password,
    Notes,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the master passphrase, trying in order:
/// 1. `LOCKBOX_PASSPHRASE` env var (scripting/CI)
/// 2. Interactive hidden prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_passphrase() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("LOCKBOX_PASSPHRASE") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master passphrase")
        .interact()
        .map_err(|e| LockboxError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new passphrase with confirmation (used by `init` and
/// `rotate-key`).  Also respects `LOCKBOX_PASSPHRASE` for scripted usage.
/// Enforces the minimum passphrase length.
pub fn prompt_new_passphrase() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("LOCKBOX_PASSPHRASE") {
        if !pw.is_empty() {
            if pw.chars().count() < MIN_PASSPHRASE_LEN {
                return Err(LockboxError::WeakPassphrase {
                    min: MIN_PASSPHRASE_LEN,
                });
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let passphrase = dialoguer::Password::new()
            .with_prompt("Choose master passphrase")
            .with_confirmation(
                "Confirm master passphrase",
                "Passphrases do not match, try again",
            )
            .interact()
            .map_err(|e| LockboxError::CommandFailed(format!("passphrase prompt: {e}")))?;

        if passphrase.chars().count() < MIN_PASSPHRASE_LEN {
            output::warning(&format!(
                "Passphrase must be at least {MIN_PASSPHRASE_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(passphrase));
    }
}

/// Build the full path to the vault file.  The `--vault-dir` flag wins
/// over the configured directory.
///
/// Example: `<cwd>/.lockbox/secrets.vault`
pub fn vault_path(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    match &cli.vault_dir {
        Some(dir) => Ok(cwd.join(dir).join("secrets.vault")),
        None => Ok(settings.vault_path(&cwd)),
    }
}

/// Session config built from `.lockbox.toml` (or defaults).
pub fn session_config(settings: &Settings) -> SessionConfig {
    SessionConfig {
        idle_ttl: settings.auto_lock_ttl(),
        kdf_params: settings.argon2_params(),
    }
}

/// Open and unlock a session for the configured vault, prompting for the
/// master passphrase.
pub fn open_session(cli: &Cli) -> Result<(Session, Settings)> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let path = vault_path(cli, &settings)?;

    let mut session = Session::new(path, session_config(&settings));
    let passphrase = prompt_passphrase()?;
    session.unlock(&passphrase)?;

    Ok((session, settings))
}
