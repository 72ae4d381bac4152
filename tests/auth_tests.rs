// tests/auth_tests.rs
mod common; // Reference the common module

use common::*;
use outlayers::services::auth_service::{hash_password, verify_or_upgrade, verify_password, PasswordCheck};
use serial_test::serial;

#[test]
#[serial]
fn test_hashing_produces_a_verifiable_argon2_credential() {
  setup_tracing();
  let hash = hash_password("hunter1234").unwrap();

  assert!(hash.starts_with("$argon2"));
  assert!(verify_password(&hash, "hunter1234").unwrap());
  assert!(!verify_password(&hash, "hunter1235").unwrap());
}

#[test]
#[serial]
fn test_empty_passwords_are_rejected() {
  setup_tracing();
  assert!(hash_password("").is_err());
  // Verification treats empty inputs as a plain mismatch.
  let hash = hash_password("hunter1234").unwrap();
  assert!(!verify_password(&hash, "").unwrap());
  assert!(!verify_password("", "hunter1234").unwrap());
}

#[test]
#[serial]
fn test_legacy_plaintext_rows_match_once_and_yield_an_upgrade_hash() {
  setup_tracing();
  let check = verify_or_upgrade("secret", "secret").unwrap();
  let rehash = match check {
    PasswordCheck::Match { rehash: Some(rehash) } => rehash,
    other => panic!("expected legacy match with rehash, got {other:?}"),
  };

  assert!(rehash.starts_with("$argon2"));
  // After persisting the upgrade the same password verifies normally
  // and no further rehash is issued.
  assert!(verify_password(&rehash, "secret").unwrap());
  let check = verify_or_upgrade(&rehash, "secret").unwrap();
  assert!(matches!(check, PasswordCheck::Match { rehash: None }));
}

#[test]
#[serial]
fn test_wrong_passwords_mismatch_for_both_credential_forms() {
  setup_tracing();
  let check = verify_or_upgrade("secret", "wrong").unwrap();
  assert!(matches!(check, PasswordCheck::Mismatch));

  let hash = hash_password("secret").unwrap();
  let check = verify_or_upgrade(&hash, "wrong").unwrap();
  assert!(matches!(check, PasswordCheck::Mismatch));

  // An empty attempt can never match, even against a legacy empty row.
  let check = verify_or_upgrade("", "").unwrap();
  assert!(matches!(check, PasswordCheck::Mismatch));
}
