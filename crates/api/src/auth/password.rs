//! Password hashing and strength checks.
//!
//! Hashes are Argon2id in PHC string form, so the salt and parameters travel
//! inside the stored value and verification needs no extra columns. The salt
//! is drawn from the OS RNG per hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a plaintext password, returning the PHC string to store.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check a plaintext password against a stored PHC hash.
///
/// A mismatch is `Ok(false)`; `Err` is reserved for malformed hashes and
/// other operational failures, which callers treat as internal errors
/// rather than bad credentials.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(other) => Err(other),
    }
}

/// Enforce the minimum length policy on a candidate password.
///
/// The `Err` message is written for end users and is returned verbatim in
/// the registration response.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    if password.len() < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_and_uses_argon2id() {
        let hash = hash_password("correcta-caballo-bateria").unwrap();
        assert!(hash.starts_with("$argon2id$"), "unexpected PHC prefix: {hash}");
        assert!(verify_password("correcta-caballo-bateria", &hash).unwrap());
    }

    #[test]
    fn mismatch_is_false_not_error() {
        let hash = hash_password("the-real-one").unwrap();
        assert!(!verify_password("a-guess", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        // Fresh salt per call, so equal inputs never collide on storage.
        let a = hash_password("repeated").unwrap();
        let b = hash_password("repeated").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_stored_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn length_policy_boundary() {
        let err = validate_password_strength("corta", MIN_PASSWORD_LENGTH).unwrap_err();
        assert!(err.contains("at least 8"), "message should carry the minimum: {err}");

        assert!(validate_password_strength("12345678", MIN_PASSWORD_LENGTH).is_ok());
        assert!(validate_password_strength("una-frase-larga", MIN_PASSWORD_LENGTH).is_ok());
    }
}
