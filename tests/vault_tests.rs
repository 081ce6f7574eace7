//! Integration tests for the on-disk vault format.

use std::fs;

use lockbox::crypto::{encrypt, Argon2Params};
use lockbox::errors::LockboxError;
use lockbox::vault::{read_vault, write_vault, VaultFile};
use tempfile::TempDir;

/// Helper: create a temporary vault file path inside a fresh temp dir.
fn vault_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("secrets.vault");
    (dir, path)
}

fn sample_file(key: &[u8; 32], plaintext: &[u8]) -> VaultFile {
    VaultFile {
        params: Argon2Params::default(),
        salt: [0x42u8; 32],
        sealed: encrypt(key, plaintext).expect("encrypt"),
    }
}

// ---------------------------------------------------------------------------
// Write and read round-trip
// ---------------------------------------------------------------------------

#[test]
fn write_and_read_roundtrip() {
    let (_dir, path) = vault_path();
    let key = [0x01u8; 32];
    let file = sample_file(&key, b"payload");

    write_vault(&path, &file).expect("write vault");
    let loaded = read_vault(&path).expect("read vault");

    assert_eq!(loaded.salt, file.salt);
    assert_eq!(loaded.params, file.params);
    assert_eq!(loaded.sealed, file.sealed);
}

#[test]
fn stored_kdf_params_survive_roundtrip() {
    let (_dir, path) = vault_path();
    let key = [0x02u8; 32];
    let mut file = sample_file(&key, b"payload");
    file.params = Argon2Params {
        memory_kib: 131_072,
        iterations: 5,
        parallelism: 8,
    };

    write_vault(&path, &file).unwrap();
    let loaded = read_vault(&path).unwrap();
    assert_eq!(loaded.params, file.params);
}

// ---------------------------------------------------------------------------
// Atomic overwrite
// ---------------------------------------------------------------------------

#[test]
fn save_replaces_previous_file_cleanly() {
    let (dir, path) = vault_path();
    let key = [0x03u8; 32];

    write_vault(&path, &sample_file(&key, b"first")).unwrap();
    write_vault(&path, &sample_file(&key, b"second")).unwrap();

    // The target is readable and no temp file is left behind.
    read_vault(&path).expect("read after overwrite");
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp file left behind after save");
}

// ---------------------------------------------------------------------------
// Nonce uniqueness across consecutive saves
// ---------------------------------------------------------------------------

#[test]
fn nonces_never_repeat_across_saves() {
    let (_dir, path) = vault_path();
    let key = [0x04u8; 32];

    let mut nonces = Vec::new();
    for _ in 0..10 {
        write_vault(&path, &sample_file(&key, b"same vault every time")).unwrap();
        let loaded = read_vault(&path).unwrap();
        nonces.push(loaded.sealed[..12].to_vec());
    }

    for (i, a) in nonces.iter().enumerate() {
        for b in &nonces[i + 1..] {
            assert_ne!(a, b, "nonce repeated across saves");
        }
    }
}

// ---------------------------------------------------------------------------
// Malformed files
// ---------------------------------------------------------------------------

#[test]
fn missing_file_is_not_found() {
    let (_dir, path) = vault_path();
    assert!(matches!(
        read_vault(&path),
        Err(LockboxError::VaultNotFound(_))
    ));
}

#[test]
fn wrong_magic_is_rejected() {
    let (_dir, path) = vault_path();
    let key = [0x05u8; 32];
    write_vault(&path, &sample_file(&key, b"payload")).unwrap();

    let mut data = fs::read(&path).unwrap();
    data[0] = b'X';
    fs::write(&path, &data).unwrap();

    assert!(matches!(
        read_vault(&path),
        Err(LockboxError::MalformedVaultFile(_))
    ));
}

#[test]
fn unsupported_version_is_rejected() {
    let (_dir, path) = vault_path();
    let key = [0x06u8; 32];
    write_vault(&path, &sample_file(&key, b"payload")).unwrap();

    let mut data = fs::read(&path).unwrap();
    data[4] = 99;
    fs::write(&path, &data).unwrap();

    assert!(matches!(
        read_vault(&path),
        Err(LockboxError::MalformedVaultFile(_))
    ));
}

#[test]
fn truncated_file_is_rejected() {
    let (_dir, path) = vault_path();
    fs::write(&path, b"LKBX\x01short").unwrap();

    assert!(matches!(
        read_vault(&path),
        Err(LockboxError::MalformedVaultFile(_))
    ));
}
