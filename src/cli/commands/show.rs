//! `lockbox show` — display one secret by index.

use comfy_table::{ContentArrangement, Table};

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::Result;

/// Execute the `show` command.
pub fn execute(cli: &Cli, index: usize, reveal: bool) -> Result<()> {
    let (mut session, _settings) = open_session(cli)?;

    let item = session.get_secret(index)?;
    let category = match item.category_id {
        Some(id) => session.category_name(id)?.unwrap_or_else(|| "-".to_string()),
        None => "-".to_string(),
    };

    let password = if reveal {
        item.password.clone()
    } else {
        "*".repeat(item.password.chars().count())
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Name / URL", "Login", "Password"]);
    table.add_row(vec![category, item.name.clone(), item.login.clone(), password]);
    println!("{table}");

    if !item.notes.is_empty() {
        println!();
        println!("Notes:");
        println!("{}", item.notes);
    }

    if !reveal {
        output::tip("Use `lockbox show --reveal` to print the password, or `lockbox copy`.");
    }

    Ok(())
}
