use std::sync::OnceLock;

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {e}")))
}

/// A stored hash that bcrypt cannot parse counts as a mismatch, so login
/// reports the same 401 as a wrong password.
pub fn verify_password(password: &str, hash: &str) -> bool {
    verify(password, hash).unwrap_or(false)
}

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

fn dummy_hash() -> Option<&'static str> {
    DUMMY_HASH
        .get_or_init(|| hash("shopfront-unknown-user", DEFAULT_COST).ok())
        .as_deref()
}

/// Runs a full-cost bcrypt verification for a login whose username does not
/// exist, so unknown and known usernames take the same time to reject.
/// Always returns `false`.
pub fn verify_password_for_unknown_user(password: &str) -> bool {
    if let Some(hash) = dummy_hash() {
        let _ = verify(password, hash);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("correct horse").unwrap();
        assert_ne!(hashed, "correct horse");
        assert!(verify_password("correct horse", &hashed));
        assert!(!verify_password("battery staple", &hashed));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_does_not_verify() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_unknown_user_check_uses_full_cost_hash() {
        let hash = dummy_hash().unwrap();
        assert!(hash.starts_with(&format!("$2b${DEFAULT_COST}$")));
        assert!(verify("shopfront-unknown-user", hash).unwrap());
    }

    #[test]
    fn test_unknown_user_never_verifies() {
        assert!(!verify_password_for_unknown_user("shopfront-unknown-user"));
        assert!(!verify_password_for_unknown_user(""));
    }
}
