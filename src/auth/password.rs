use crate::error::AppError;
use bcrypt::{hash, verify};

/// Work factor for the adaptive hash. Matches the cost the user records were
/// created with; changing it only affects newly hashed passwords.
const BCRYPT_COST: u32 = 10;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, BCRYPT_COST)
        .map_err(|e| AppError::Internal(format!("failed to hash password: {}", e)))
}

/// Checks a plaintext password against a stored digest.
///
/// Returns `false` for a mismatch and also for a malformed digest; callers
/// only ever branch on the boolean, so a corrupt stored hash behaves like a
/// wrong password instead of surfacing a server error.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    verify(password, hashed_password).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "test_password123";
        let hashed = hash_password(password).unwrap();

        assert!(verify_password(password, &hashed));
        assert!(!verify_password("wrong_password", &hashed));
    }

    #[test]
    fn test_verify_with_malformed_digest_returns_false() {
        assert!(!verify_password("test_password123", "invalidhashformat"));
        assert!(!verify_password("test_password123", ""));
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = "same_password";
        let first = hash_password(password).unwrap();
        let second = hash_password(password).unwrap();

        assert_ne!(first, second);
        assert!(verify_password(password, &first));
        assert!(verify_password(password, &second));
    }
}
