//! Integration tests for the Lockbox crypto module.

use lockbox::crypto::kdf::{derive_master_key_with_params, ensure_passphrase_strength};
use lockbox::crypto::{decrypt, encrypt, generate_salt, Argon2Params, MasterKey};
use lockbox::errors::LockboxError;

/// Cheap Argon2 params so tests stay fast; still above the enforced floor.
fn test_params() -> Argon2Params {
    Argon2Params {
        memory_kib: 8_192,
        iterations: 1,
        parallelism: 1,
    }
}

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = [0xABu8; 32];
    let plaintext = b"{\"categories\":[],\"secrets\":[]}";

    let sealed = encrypt(&key, plaintext).expect("encrypt should succeed");

    // Sealed blob must be longer than plaintext (12-byte nonce + 16-byte tag).
    assert_eq!(sealed.len(), plaintext.len() + 12 + 16);

    let recovered = decrypt(&key, &sealed).expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let key = [0xCDu8; 32];
    let plaintext = b"same vault, saved twice";

    let ct1 = encrypt(&key, plaintext).expect("encrypt 1");
    let ct2 = encrypt(&key, plaintext).expect("encrypt 2");

    // Because each call generates a new random nonce, the output must differ.
    assert_ne!(ct1, ct2, "two encryptions of the same plaintext must differ");
    // And so must the nonces themselves.
    assert_ne!(&ct1[..12], &ct2[..12], "nonces must never repeat");
}

#[test]
fn decrypt_with_wrong_key_fails() {
    let key = [0x11u8; 32];
    let wrong_key = [0x22u8; 32];

    let sealed = encrypt(&key, b"top secret").expect("encrypt");
    let result = decrypt(&wrong_key, &sealed);

    assert!(matches!(result, Err(LockboxError::IntegrityFailure)));
}

#[test]
fn decrypt_with_truncated_data_fails() {
    // Anything shorter than nonce + tag must be rejected outright.
    let key = [0xAAu8; 32];
    let result = decrypt(&key, &[0u8; 20]);
    assert!(matches!(result, Err(LockboxError::IntegrityFailure)));
}

#[test]
fn decrypt_with_any_flipped_bit_fails() {
    let key = [0xBBu8; 32];
    let sealed = encrypt(&key, b"integrity matters").expect("encrypt");

    // Flip one bit in every position: nonce, ciphertext, and tag alike
    // must all trip the auth check.
    for pos in 0..sealed.len() {
        let mut tampered = sealed.clone();
        tampered[pos] ^= 0x01;
        assert!(
            decrypt(&key, &tampered).is_err(),
            "bit flip at byte {pos} was not detected"
        );
    }
}

// ---------------------------------------------------------------------------
// Key derivation (Argon2id)
// ---------------------------------------------------------------------------

#[test]
fn derive_master_key_same_inputs_same_output() {
    let passphrase = b"my-secure-passphrase";
    let salt = generate_salt();

    let key1 = derive_master_key_with_params(passphrase, &salt, &test_params()).expect("derive 1");
    let key2 = derive_master_key_with_params(passphrase, &salt, &test_params()).expect("derive 2");

    assert_eq!(key1, key2, "same passphrase + salt must produce the same key");
}

#[test]
fn derive_master_key_different_salts_different_keys() {
    let passphrase = b"same-passphrase";
    let salt1 = generate_salt();
    let salt2 = generate_salt();

    let key1 = derive_master_key_with_params(passphrase, &salt1, &test_params()).expect("derive 1");
    let key2 = derive_master_key_with_params(passphrase, &salt2, &test_params()).expect("derive 2");

    assert_ne!(key1, key2, "different salts must produce different keys");
}

#[test]
fn derive_master_key_different_passphrases_different_keys() {
    let salt = generate_salt();

    let key1 = derive_master_key_with_params(b"passphrase-one", &salt, &test_params()).unwrap();
    let key2 = derive_master_key_with_params(b"passphrase-two", &salt, &test_params()).unwrap();

    assert_ne!(key1, key2, "different passphrases must produce different keys");
}

#[test]
fn generated_salts_are_unique() {
    let salts: Vec<_> = (0..8).map(|_| generate_salt()).collect();
    for (i, a) in salts.iter().enumerate() {
        for b in &salts[i + 1..] {
            assert_ne!(a, b, "two generated salts collided");
        }
    }
}

// ---------------------------------------------------------------------------
// Passphrase policy
// ---------------------------------------------------------------------------

#[test]
fn short_passphrase_is_weak() {
    assert!(matches!(
        ensure_passphrase_strength("1234567"),
        Err(LockboxError::WeakPassphrase { min: 8 })
    ));
    assert!(ensure_passphrase_strength("12345678").is_ok());
}

// ---------------------------------------------------------------------------
// End-to-end: passphrase -> master key -> encrypt/decrypt
// ---------------------------------------------------------------------------

#[test]
fn full_crypto_pipeline() {
    let salt = generate_salt();
    let master_bytes =
        derive_master_key_with_params(b"correcthorse", &salt, &test_params()).expect("derive");
    let master = MasterKey::new(master_bytes);

    let plaintext = b"{\"secrets\":[{\"name\":\"bank\"}]}";
    let sealed = encrypt(master.as_bytes(), plaintext).expect("encrypt");
    let recovered = decrypt(master.as_bytes(), &sealed).expect("decrypt");
    assert_eq!(recovered, plaintext.to_vec());
}
