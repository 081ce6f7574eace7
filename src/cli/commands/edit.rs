//! `lockbox edit` — change a single field of a secret.

use crate::cli::output;
use crate::cli::{open_session, Cli, FieldArg};
use crate::errors::{LockboxError, Result};
use crate::vault::FieldEdit;

/// Execute the `edit` command.
pub fn execute(cli: &Cli, index: usize, field: FieldArg, value: Option<&str>) -> Result<()> {
    let edit = build_edit(field, value)?;

    let (mut session, _settings) = open_session(cli)?;
    session.edit_secret(index, edit)?;

    output::success(&format!("Secret {index} updated"));
    Ok(())
}

/// Turn the CLI field/value pair into a typed `FieldEdit`.
///
/// The password is prompted when no value is given; every other field
/// requires an explicit value.  For the category, `none` clears the
/// reference.
fn build_edit(field: FieldArg, value: Option<&str>) -> Result<FieldEdit> {
    match field {
        FieldArg::Password => {
            let password = match value {
                Some(v) => {
                    output::warning("Password provided on command line — it may appear in shell history.");
                    v.to_string()
                }
                None => dialoguer::Password::new()
                    .with_prompt("New password")
                    .interact()
                    .map_err(|e| LockboxError::CommandFailed(format!("input prompt: {e}")))?,
            };
            Ok(FieldEdit::Password(password))
        }
        FieldArg::Category => {
            let v = require_value(value)?;
            if v.eq_ignore_ascii_case("none") {
                Ok(FieldEdit::Category(None))
            } else {
                let id: u32 = v.parse().map_err(|_| {
                    LockboxError::CommandFailed(format!(
                        "'{v}' is not a category id (use a number or 'none')"
                    ))
                })?;
                Ok(FieldEdit::Category(Some(id)))
            }
        }
        FieldArg::Name => Ok(FieldEdit::Name(require_value(value)?.to_string())),
        FieldArg::Login => Ok(FieldEdit::Login(require_value(value)?.to_string())),
        FieldArg::Notes => Ok(FieldEdit::Notes(require_value(value)?.to_string())),
    }
}

fn require_value(value: Option<&str>) -> Result<&str> {
    value.ok_or_else(|| LockboxError::CommandFailed("this field requires a value".into()))
}
