//! Pure in-memory operations on the decrypted vault.
//!
//! Nothing here touches the disk or the key material: the session layer
//! calls these, then re-encrypts and persists the whole vault after every
//! mutation.

use crate::errors::{LockboxError, Result};

use super::item::{Category, SecretItem, Vault};

/// A single-field edit to a secret.
///
/// A closed set of variants instead of string-keyed dispatch, so each
/// field carries its own typed value and category edits get validated
/// the same way `add_secret` validates them.
#[derive(Debug, Clone)]
pub enum FieldEdit {
    Category(Option<u32>),
    Name(String),
    Login(String),
    Password(String),
    Notes(String),
}

impl Vault {
    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    /// Add a category and return its id.
    ///
    /// Ids start at 1 and are never reused, so stored references on
    /// secrets stay valid for the life of the vault.
    pub fn add_category(&mut self, name: &str) -> u32 {
        let id = self
            .categories
            .iter()
            .map(|c| c.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        self.categories.push(Category {
            id,
            name: name.to_string(),
        });
        id
    }

    /// Look up a category name by id.
    pub fn category_name(&self, id: u32) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    /// Delete a category.
    ///
    /// Fails with `CategoryInUse` if any secret still references it —
    /// deletion never cascades or clears references.
    pub fn delete_category(&mut self, id: u32) -> Result<()> {
        let pos = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(LockboxError::InvalidCategory(id))?;

        let count = self
            .secrets
            .iter()
            .filter(|s| s.category_id == Some(id))
            .count();
        if count > 0 {
            return Err(LockboxError::CategoryInUse { count });
        }

        self.categories.remove(pos);
        Ok(())
    }

    fn validate_category(&self, category_id: Option<u32>) -> Result<()> {
        match category_id {
            Some(id) if self.category_name(id).is_none() => {
                Err(LockboxError::InvalidCategory(id))
            }
            _ => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Secrets
    // ------------------------------------------------------------------

    /// Append a secret and return its index.
    ///
    /// The category reference, if any, must point at an existing category.
    pub fn add_secret(&mut self, item: SecretItem) -> Result<usize> {
        self.validate_category(item.category_id)?;
        self.secrets.push(item);
        Ok(self.secrets.len() - 1)
    }

    /// Get a secret by index.
    pub fn get_secret(&self, index: usize) -> Result<&SecretItem> {
        self.secrets
            .get(index)
            .ok_or(LockboxError::SecretNotFound(index))
    }

    /// Apply a single-field edit to the secret at `index`.
    pub fn edit_secret(&mut self, index: usize, edit: FieldEdit) -> Result<()> {
        if let FieldEdit::Category(id) = edit {
            self.validate_category(id)?;
        }
        let item = self
            .secrets
            .get_mut(index)
            .ok_or(LockboxError::SecretNotFound(index))?;

        match edit {
            FieldEdit::Category(id) => item.category_id = id,
            FieldEdit::Name(v) => item.name = v,
            FieldEdit::Login(v) => item.login = v,
            FieldEdit::Password(v) => item.password = v,
            FieldEdit::Notes(v) => item.notes = v,
        }
        Ok(())
    }

    /// Remove the secret at `index`.
    ///
    /// Addressing contract: every secret previously at index `j > index`
    /// is at `j - 1` afterwards.  Callers holding indices must re-resolve
    /// them after a deletion.
    pub fn delete_secret(&mut self, index: usize) -> Result<()> {
        if index >= self.secrets.len() {
            return Err(LockboxError::SecretNotFound(index));
        }
        // The removed item zeroizes on drop.
        self.secrets.remove(index);
        Ok(())
    }

    /// Case-insensitive substring search over name, login, notes, and the
    /// resolved category name, in vault order.
    ///
    /// An empty (or whitespace-only) query is an error; a query with no
    /// matches is a valid empty result.
    pub fn search(&self, query: &str) -> Result<Vec<(usize, &SecretItem)>> {
        if query.trim().is_empty() {
            return Err(LockboxError::EmptySearch);
        }
        let needle = query.to_lowercase();

        let hits = self
            .secrets
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                let category = item
                    .category_id
                    .and_then(|id| self.category_name(id))
                    .unwrap_or("");
                item.name.to_lowercase().contains(&needle)
                    || item.login.to_lowercase().contains(&needle)
                    || item.notes.to_lowercase().contains(&needle)
                    || category.to_lowercase().contains(&needle)
            })
            .collect();

        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, login: &str, category_id: Option<u32>) -> SecretItem {
        SecretItem {
            category_id,
            name: name.to_string(),
            login: login.to_string(),
            password: "hunter2".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn category_ids_are_ordinal_and_not_reused() {
        let mut vault = Vault::new();
        assert_eq!(vault.add_category("Email"), 1);
        assert_eq!(vault.add_category("Banking"), 2);
        assert_eq!(vault.category_name(1), Some("Email"));
        assert_eq!(vault.category_name(99), None);

        vault.delete_category(2).unwrap();
        // Next id continues past the deleted one.
        assert_eq!(vault.add_category("Work"), 3);
    }

    #[test]
    fn referenced_category_cannot_be_deleted() {
        let mut vault = Vault::new();
        let id = vault.add_category("Email");
        vault.add_secret(item("gmail", "alice", Some(id))).unwrap();
        vault.add_secret(item("proton", "alice", Some(id))).unwrap();

        match vault.delete_category(id) {
            Err(LockboxError::CategoryInUse { count }) => assert_eq!(count, 2),
            other => panic!("expected CategoryInUse, got {other:?}"),
        }
    }

    #[test]
    fn add_secret_rejects_unknown_category() {
        let mut vault = Vault::new();
        let result = vault.add_secret(item("gmail", "alice", Some(7)));
        assert!(matches!(result, Err(LockboxError::InvalidCategory(7))));
        assert!(vault.secrets.is_empty());
    }

    #[test]
    fn edit_validates_category_reference() {
        let mut vault = Vault::new();
        let idx = vault.add_secret(item("gmail", "alice", None)).unwrap();

        let result = vault.edit_secret(idx, FieldEdit::Category(Some(42)));
        assert!(matches!(result, Err(LockboxError::InvalidCategory(42))));

        let id = vault.add_category("Email");
        vault.edit_secret(idx, FieldEdit::Category(Some(id))).unwrap();
        assert_eq!(vault.get_secret(idx).unwrap().category_id, Some(id));
    }

    #[test]
    fn edit_replaces_single_field() {
        let mut vault = Vault::new();
        let idx = vault.add_secret(item("gmail", "alice", None)).unwrap();

        vault
            .edit_secret(idx, FieldEdit::Login("bob".to_string()))
            .unwrap();
        let s = vault.get_secret(idx).unwrap();
        assert_eq!(s.login, "bob");
        assert_eq!(s.name, "gmail");
    }

    #[test]
    fn delete_shifts_later_indices_down() {
        let mut vault = Vault::new();
        vault.add_secret(item("a", "", None)).unwrap();
        vault.add_secret(item("b", "", None)).unwrap();
        vault.add_secret(item("c", "", None)).unwrap();

        vault.delete_secret(1).unwrap();
        assert_eq!(vault.get_secret(0).unwrap().name, "a");
        assert_eq!(vault.get_secret(1).unwrap().name, "c");
        assert!(matches!(
            vault.get_secret(2),
            Err(LockboxError::SecretNotFound(2))
        ));
    }

    #[test]
    fn search_matches_all_fields_case_insensitively() {
        let mut vault = Vault::new();
        let bank = vault.add_category("Banking");
        vault
            .add_secret(item("Acme Bank", "alice@acme.test", Some(bank)))
            .unwrap();
        vault.add_secret(item("forum", "carol", None)).unwrap();

        // Name match.
        assert_eq!(vault.search("acme").unwrap().len(), 1);
        // Login match.
        assert_eq!(vault.search("ALICE").unwrap().len(), 1);
        // Resolved category name match.
        assert_eq!(vault.search("banking").unwrap().len(), 1);
        // No match is a valid empty result.
        assert!(vault.search("zzz").unwrap().is_empty());
    }

    #[test]
    fn search_results_keep_vault_order_and_live_indices() {
        let mut vault = Vault::new();
        vault.add_secret(item("mail one", "", None)).unwrap();
        vault.add_secret(item("other", "", None)).unwrap();
        vault.add_secret(item("mail two", "", None)).unwrap();

        let hits = vault.search("mail").unwrap();
        let indices: Vec<usize> = hits.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn empty_query_is_an_error_not_an_empty_result() {
        let vault = Vault::new();
        assert!(matches!(vault.search(""), Err(LockboxError::EmptySearch)));
        assert!(matches!(vault.search("  "), Err(LockboxError::EmptySearch)));
    }
}
