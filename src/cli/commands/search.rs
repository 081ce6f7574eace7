//! `lockbox search` — find secrets by name, login, notes, or category.

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::Result;

/// Execute the `search` command.
pub fn execute(cli: &Cli, query: &str) -> Result<()> {
    let (mut session, _settings) = open_session(cli)?;

    let hits = session.search(query)?;
    let categories = session.categories()?;

    if hits.is_empty() {
        output::info(&format!("No results for '{query}'."));
        return Ok(());
    }

    output::print_secrets_table(&hits, |id| {
        categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    });
    output::tip("Indices shift when secrets are deleted — re-run search after deletions.");

    Ok(())
}
