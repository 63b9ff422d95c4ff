//! Repositories for database operations

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};

pub mod admins;
pub mod orders;
pub mod products;
pub mod users;

// Re-export for convenience
pub use admins::AdminRepository;
pub use orders::{OrderRepository, StatusUpdate};
pub use products::ProductRepository;
pub use users::UserRepository;

/// Hash a password with argon2 and a fresh random salt
pub(crate) fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();
    Ok(hash)
}

/// Verify a candidate password against a stored argon2 hash
pub(crate) fn verify_password_hash(stored_hash: &str, candidate: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

    let argon2 = Argon2::default();
    Ok(argon2
        .verify_password(candidate.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Whether an error from a repository call is a Postgres unique-constraint
/// violation (used to map insert races onto the duplicate-email response).
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23505")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("secret1").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password_hash(&hash, "secret1").unwrap());
        assert!(!verify_password_hash(&hash, "wrong").unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("secret1").unwrap();
        let b = hash_password("secret1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(verify_password_hash("not-a-hash", "secret1").is_err());
    }

    #[test]
    fn test_is_unique_violation_ignores_other_errors() {
        let err = anyhow::anyhow!("plain error");
        assert!(!is_unique_violation(&err));

        let err: anyhow::Error = sqlx::Error::RowNotFound.into();
        assert!(!is_unique_violation(&err));
    }
}
