// src/services/auth_service.rs

//! Password hashing and verification.
//!
//! New credentials are hashed with Argon2. Stored rows may still carry
//! legacy plain-text passwords from the system this one replaced;
//! [`verify_or_upgrade`] accepts those once and hands back a fresh
//! Argon2 hash for the caller to persist.

use crate::errors::AppError;
use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use tracing::{debug, error, instrument};

/// Outcome of a credential check against a stored row.
#[derive(Debug)]
pub enum PasswordCheck {
  /// The password matched. `rehash` carries a new Argon2 hash when the
  /// stored row was a legacy plain-text credential and must be
  /// upgraded.
  Match { rehash: Option<String> },
  Mismatch,
}

/// Hashes a plain-text password with Argon2 and a random salt.
///
/// # Arguments
/// * `password`: The plain-text password to hash.
///
/// # Returns
/// The PHC-formatted hash string, or an `AppError` if the password is
/// empty or hashing fails.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    return Err(AppError::Validation("Password cannot be empty.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  let argon2_hasher = Argon2::default();

  match argon2_hasher.hash_password(password.as_bytes(), &salt) {
    Ok(password_hash_obj) => Ok(password_hash_obj.to_string()),
    Err(argon_err) => {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      Err(AppError::Internal(format!("Password hashing process failed: {}", argon_err)))
    }
  }
}

/// Verifies a plain-text password against a stored Argon2 hash.
///
/// # Arguments
/// * `hashed_password_str`: The stored PHC hash string.
/// * `provided_password`: The plain-text password to check.
///
/// # Returns
/// `true` if the password matches, `false` if it does not; an
/// `AppError` when the stored hash cannot be parsed.
#[instrument(name = "auth_service::verify_password", skip(hashed_password_str, provided_password), err(Display))]
pub fn verify_password(hashed_password_str: &str, provided_password: &str) -> Result<bool, AppError> {
  if hashed_password_str.is_empty() || provided_password.is_empty() {
    return Ok(false);
  }

  let parsed_hash = match PasswordHash::new(hashed_password_str) {
    Ok(ph) => ph,
    Err(parse_err) => {
      error!(error = %parse_err, "Failed to parse stored password hash string.");
      return Err(AppError::Internal(format!("Invalid stored password hash format: {}", parse_err)));
    }
  };

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => Ok(false),
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 password verification process encountered an error.");
      Err(AppError::Internal(format!(
        "Password verification process failed: {}",
        other_argon_err
      )))
    }
  }
}

/// Checks a login attempt against the stored credential, upgrading
/// legacy rows.
///
/// Rows starting with `$argon2` go through normal verification. Any
/// other row is a legacy plain-text credential: it matches by direct
/// comparison, and a match returns a fresh hash the caller must write
/// back via the store.
#[instrument(name = "auth_service::verify_or_upgrade", skip_all)]
pub fn verify_or_upgrade(stored: &str, provided: &str) -> Result<PasswordCheck, AppError> {
  if provided.is_empty() {
    return Ok(PasswordCheck::Mismatch);
  }

  if stored.starts_with("$argon2") {
    if verify_password(stored, provided)? {
      Ok(PasswordCheck::Match { rehash: None })
    } else {
      Ok(PasswordCheck::Mismatch)
    }
  } else if stored == provided {
    debug!("Legacy plain-text credential matched; issuing upgrade hash.");
    let rehash = hash_password(provided)?;
    Ok(PasswordCheck::Match { rehash: Some(rehash) })
  } else {
    Ok(PasswordCheck::Mismatch)
  }
}
