//! Vault data model, pure in-memory operations, and the on-disk format.

pub mod format;
pub mod item;
pub mod repository;

pub use format::{read_vault, write_vault, VaultFile};
pub use item::{Category, SecretItem, Vault};
pub use repository::FieldEdit;
