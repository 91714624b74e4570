// vitrine/src/auth/password.rs

use crate::error::CatalogError;
use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use tracing::{debug, error, instrument};

/// Hashes a plain-text password into an argon2 PHC string.
#[instrument(name = "auth::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, CatalogError> {
  if password.is_empty() {
    return Err(CatalogError::Config("Owner password cannot be empty.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| {
      error!(error = %e, "Argon2 password hashing failed.");
      CatalogError::Internal(format!("Password hashing failed: {}", e))
    })
}

/// Checks `provided` against a stored argon2 hash.
///
/// `Ok(false)` means the password is wrong; `Err` means the stored hash itself
/// is unusable.
#[instrument(name = "auth::verify_password", skip_all, err(Display))]
pub fn verify_password(stored_hash: &str, provided: &str) -> Result<bool, CatalogError> {
  if provided.is_empty() {
    debug!("Empty password rejected.");
    return Ok(false);
  }

  let parsed = PasswordHash::new(stored_hash).map_err(|e| {
    error!(error = %e, "Stored owner password hash is invalid.");
    CatalogError::Config(format!("Invalid owner password hash: {}", e))
  })?;

  match Argon2::default().verify_password(provided.as_bytes(), &parsed) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => Ok(false),
    Err(e) => {
      error!(error = %e, "Password verification failed unexpectedly.");
      Err(CatalogError::Internal(format!("Password verification failed: {}", e)))
    }
  }
}
