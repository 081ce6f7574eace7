use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{LockboxError, Result};

/// User configuration, loaded from `.lockbox.toml`.
///
/// Every field has a sensible default so Lockbox works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) holding the vault file.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// Seconds of inactivity before the vault auto-locks (default: 90).
    #[serde(default = "default_auto_lock_ttl_secs")]
    pub auto_lock_ttl_secs: u64,

    /// Seconds before a copied secret is cleared from the clipboard (default: 15).
    #[serde(default = "default_clipboard_ttl_secs")]
    pub clipboard_ttl_secs: u64,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    ".lockbox".to_string()
}

fn default_auto_lock_ttl_secs() -> u64 {
    90
}

fn default_clipboard_ttl_secs() -> u64 {
    15
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            auto_lock_ttl_secs: default_auto_lock_ttl_secs(),
            clipboard_ttl_secs: default_clipboard_ttl_secs(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".lockbox.toml";

    /// Load settings from `<base_dir>/.lockbox.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let config_path = base_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            LockboxError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Build the full path to the vault file.
    ///
    /// Example: `base_dir/.lockbox/secrets.vault`
    pub fn vault_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.vault_dir).join("secrets.vault")
    }

    /// Idle auto-lock TTL as a `Duration`.
    pub fn auto_lock_ttl(&self) -> Duration {
        Duration::from_secs(self.auto_lock_ttl_secs)
    }

    /// Clipboard clear TTL as a `Duration`.
    pub fn clipboard_ttl(&self) -> Duration {
        Duration::from_secs(self.clipboard_ttl_secs)
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> crate::crypto::kdf::Argon2Params {
        crate::crypto::kdf::Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.vault_dir, ".lockbox");
        assert_eq!(s.auto_lock_ttl_secs, 90);
        assert_eq!(s.clipboard_ttl_secs, 15);
        assert_eq!(s.argon2_memory_kib, 65_536);
        assert_eq!(s.argon2_iterations, 3);
        assert_eq!(s.argon2_parallelism, 4);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.auto_lock_ttl_secs, 90);
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
vault_dir = "secrets"
auto_lock_ttl_secs = 30
clipboard_ttl_secs = 5
argon2_memory_kib = 131072
argon2_iterations = 5
argon2_parallelism = 8
"#;
        fs::write(tmp.path().join(".lockbox.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_dir, "secrets");
        assert_eq!(settings.auto_lock_ttl_secs, 30);
        assert_eq!(settings.clipboard_ttl_secs, 5);
        assert_eq!(settings.argon2_memory_kib, 131_072);
        assert_eq!(settings.argon2_iterations, 5);
        assert_eq!(settings.argon2_parallelism, 8);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        let config = "auto_lock_ttl_secs = 120\n";
        fs::write(tmp.path().join(".lockbox.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.auto_lock_ttl_secs, 120);
        // Rest should be defaults
        assert_eq!(settings.vault_dir, ".lockbox");
        assert_eq!(settings.clipboard_ttl_secs, 15);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".lockbox.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(result.is_err());
    }

    #[test]
    fn vault_path_builds_correct_path() {
        let s = Settings::default();
        let base = Path::new("/home/user");
        assert_eq!(
            s.vault_path(base),
            PathBuf::from("/home/user/.lockbox/secrets.vault")
        );
    }
}
