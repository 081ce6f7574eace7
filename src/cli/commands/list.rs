//! `lockbox list` — table of all secrets (passwords never shown).

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (mut session, _settings) = open_session(cli)?;

    let rows = session.list_secrets()?;
    let categories = session.categories()?;

    output::print_secrets_table(&rows, |id| {
        categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    });

    Ok(())
}
