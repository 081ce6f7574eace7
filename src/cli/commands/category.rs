//! `lockbox category` — create and list categories.

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::Result;

/// Execute `category add`.
pub fn execute_add(cli: &Cli, name: &str) -> Result<()> {
    let (mut session, _settings) = open_session(cli)?;
    let id = session.add_category(name)?;
    output::success(&format!("Category '{name}' created with id {id}"));
    Ok(())
}

/// Execute `category list`.
pub fn execute_list(cli: &Cli) -> Result<()> {
    let (mut session, _settings) = open_session(cli)?;
    let categories = session.categories()?;
    output::print_categories_table(&categories);
    Ok(())
}
