use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

use crate::errors::AppError;

/// Characters the sign-up policy counts as special
const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Hash a password with Argon2id and a fresh random salt
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::InternalError(format!("Stored password hash is invalid: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Check the sign-up password policy, reporting the first rule that fails
pub fn validate_strength(password: &str) -> Result<(), AppError> {
    if password.chars().count() < 6 {
        return Err(AppError::ValidationError(
            "Password must be at least 6 characters long".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(AppError::ValidationError(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(AppError::ValidationError(
            "Password must contain at least one lowercase letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::ValidationError(
            "Password must contain at least one number".to_string(),
        ));
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        return Err(AppError::ValidationError(
            "Password must contain at least one special character".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_with(password: &str, expected: &str) {
        match validate_strength(password) {
            Err(AppError::ValidationError(msg)) => assert_eq!(msg, expected),
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = hash_password("Secure1!").unwrap();
        assert!(verify_password("Secure1!", &hash).unwrap());
        assert!(!verify_password("Secure2!", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("Secure1!").unwrap();
        let b = hash_password("Secure1!").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn strength_rules_report_first_failure() {
        rejected_with("S1!", "Password must be at least 6 characters long");
        rejected_with("secure1!", "Password must contain at least one uppercase letter");
        rejected_with("SECURE1!", "Password must contain at least one lowercase letter");
        rejected_with("Secure!!", "Password must contain at least one number");
        rejected_with("Secure11", "Password must contain at least one special character");
    }

    #[test]
    fn strong_password_passes() {
        assert!(validate_strength("Secure1!").is_ok());
        assert!(validate_strength("aB3{longer}").is_ok());
    }
}
