//! Salted password hashes for locally stored profiles.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use uuid::Uuid;

use crate::repository::StorageError;

/// Hash `password` with Argon2id under a fresh random salt.
///
/// The result is a PHC string carrying its own salt and parameters.
///
/// # Errors
///
/// Returns `StorageError::Credential` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, StorageError> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
        .map_err(|e| StorageError::Credential(e.to_string()))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StorageError::Credential(e.to_string()))?;
    Ok(hash.to_string())
}

/// Whether `password` matches a PHC string produced by [`hash_password`].
///
/// A malformed stored hash never matches.
#[must_use]
pub fn verify_password(stored: &str, password: &str) -> bool {
    PasswordHash::new(stored).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_same_password() {
        let hash = hash_password("secret1").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(&hash, "secret1"));
        assert!(!verify_password(&hash, "secret2"));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let a = hash_password("secret1").unwrap();
        let b = hash_password("secret1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_hash_never_matches() {
        assert!(!verify_password("not-a-phc-string", "secret1"));
        assert!(!verify_password("", ""));
    }
}
