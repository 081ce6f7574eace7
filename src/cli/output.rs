//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.  Passwords are never
//! printed here — tables only ever carry category/name/login columns.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{Category, SecretItem};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of secrets (Index, Category, Name / URL, Login).
///
/// `resolve_category` maps a category id to its display name.
pub fn print_secrets_table<'a, F>(rows: &[(usize, SecretItem)], mut resolve_category: F)
where
    F: FnMut(u32) -> Option<&'a str>,
{
    if rows.is_empty() {
        info("No secrets to show.");
        tip("Run `lockbox add` to add your first secret.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Category", "Name / URL", "Login"]);

    for (index, item) in rows {
        let category = item
            .category_id
            .and_then(|id| resolve_category(id))
            .unwrap_or("-");
        table.add_row(vec![
            index.to_string(),
            category.to_string(),
            item.name.clone(),
            item.login.clone(),
        ]);
    }

    println!("{table}");
}

/// Print the category list (Id, Name).
pub fn print_categories_table(categories: &[Category]) {
    if categories.is_empty() {
        info("No categories yet.");
        tip("Run `lockbox category add <name>` to create one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name"]);

    for c in categories {
        table.add_row(vec![c.id.to_string(), c.name.clone()]);
    }

    println!("{table}");
}
