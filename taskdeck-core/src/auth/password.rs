//! Password hashing and policy validation using Argon2id.
//!
//! # Security
//!
//! - **Algorithm**: Argon2id with a fresh 16-byte random salt per password
//! - **Memory**: 64 MB (65536 KB)
//! - **Iterations**: 3 passes
//! - **Parallelism**: 4 lanes
//! - **Output**: 32-byte hash, stored as a PHC string
//!
//! Verification goes through the Argon2 verifier, which recomputes the hash
//! and compares in constant time — never a direct string comparison that
//! could leak the position of the first differing byte.
//!
//! # Example
//!
//! ```
//! use taskdeck_core::auth::password::{hash_password, verify_password};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let hash = hash_password("Str0ng!Pass")?;
//!
//! assert!(verify_password("Str0ng!Pass", &hash)?);
//! assert!(!verify_password("wrong_password", &hash)?);
//! # Ok(())
//! # }
//! ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};
use std::fmt;

/// The special characters the password policy accepts.
///
/// This is a fixed set, not "any non-alphanumeric character": a password
/// whose only symbol falls outside this set does not satisfy the policy.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()[]-+=?";

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// A single violated rule of the password policy.
///
/// All five rules must hold for a password to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyViolation {
    /// Fewer than 8 characters
    TooShort,

    /// No uppercase letter
    MissingUppercase,

    /// No lowercase letter
    MissingLowercase,

    /// No digit
    MissingDigit,

    /// No character from [`SPECIAL_CHARACTERS`]
    MissingSpecial,
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyViolation::TooShort => write!(f, "must be at least 8 characters long"),
            PolicyViolation::MissingUppercase => {
                write!(f, "must contain at least one uppercase letter")
            }
            PolicyViolation::MissingLowercase => {
                write!(f, "must contain at least one lowercase letter")
            }
            PolicyViolation::MissingDigit => write!(f, "must contain at least one digit"),
            PolicyViolation::MissingSpecial => write!(
                f,
                "must contain at least one special character ({})",
                SPECIAL_CHARACTERS
            ),
        }
    }
}

/// Checks a password against the policy.
///
/// Pure function: returns every violated rule so callers can print them all
/// and re-prompt until the list comes back empty. An empty vec means the
/// password is acceptable.
///
/// # Example
///
/// ```
/// use taskdeck_core::auth::password::validate_password_policy;
///
/// assert!(validate_password_policy("Abc123!@").is_empty());
/// assert!(!validate_password_policy("abc12345").is_empty());
/// ```
pub fn validate_password_policy(password: &str) -> Vec<PolicyViolation> {
    let mut violations = Vec::new();

    if password.chars().count() < 8 {
        violations.push(PolicyViolation::TooShort);
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(PolicyViolation::MissingUppercase);
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push(PolicyViolation::MissingLowercase);
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push(PolicyViolation::MissingDigit);
    }

    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        violations.push(PolicyViolation::MissingSpecial);
    }

    violations
}

/// Hashes a password using Argon2id with secure parameters.
///
/// # Returns
///
/// PHC string format hash (includes algorithm, parameters, salt, and hash):
///
/// ```text
/// $argon2id$v=19$m=65536,t=3,p=4$c2FsdHNhbHQ$hash...
/// ```
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(65536) // 64 MB
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored hash.
///
/// The comparison is constant-time with respect to where the inputs differ.
///
/// # Returns
///
/// `Ok(true)` if the password matches, `Ok(false)` if it does not.
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if the stored hash cannot be parsed,
/// or `PasswordError::VerifyError` on other verification failures.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    // Parameters are embedded in the PHC string.
    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!(
            "Verification failed: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_phc_format() {
        let hash = hash_password("Str0ng!Pass").expect("Hash should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_hash_password_produces_different_salts() {
        let hash1 = hash_password("same_password").expect("Hash 1 should succeed");
        let hash2 = hash_password("same_password").expect("Hash 2 should succeed");

        // Different salts = different hashes
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_roundtrip() {
        let password = "C0mpl3x#Pwd";
        let hash = hash_password(password).expect("Hash should succeed");

        assert!(verify_password(password, &hash).expect("Verify should succeed"));
        assert!(!verify_password("wrong_password", &hash).expect("Verify should succeed"));
        assert!(!verify_password("", &hash).expect("Verify should succeed"));
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        assert!(verify_password("password", "not-a-phc-string").is_err());
        assert!(verify_password("password", "$argon2id$invalid").is_err());
    }

    #[test]
    fn test_policy_accepts_compliant_passwords() {
        for password in ["Abc123!@", "MyP@ssw0rd", "Str0ng?Pass", "A1b2[c3]d4"] {
            assert!(
                validate_password_policy(password).is_empty(),
                "Password '{}' should satisfy the policy",
                password
            );
        }
    }

    #[test]
    fn test_policy_rejects_example_from_the_wild() {
        // No uppercase and no special character
        let violations = validate_password_policy("abc12345");
        assert!(violations.contains(&PolicyViolation::MissingUppercase));
        assert!(violations.contains(&PolicyViolation::MissingSpecial));
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_policy_each_rule_fails_independently() {
        assert_eq!(
            validate_password_policy("Ab1!xyz"),
            vec![PolicyViolation::TooShort]
        );
        assert_eq!(
            validate_password_policy("lower123!"),
            vec![PolicyViolation::MissingUppercase]
        );
        assert_eq!(
            validate_password_policy("UPPER123!"),
            vec![PolicyViolation::MissingLowercase]
        );
        assert_eq!(
            validate_password_policy("NoDigits!"),
            vec![PolicyViolation::MissingDigit]
        );
        assert_eq!(
            validate_password_policy("NoSpecial123"),
            vec![PolicyViolation::MissingSpecial]
        );
    }

    #[test]
    fn test_policy_special_set_is_exact() {
        // '~' is non-alphanumeric but not in the accepted set
        let violations = validate_password_policy("Abc12345~");
        assert_eq!(violations, vec![PolicyViolation::MissingSpecial]);

        // Every character of the set satisfies the special rule on its own
        for c in SPECIAL_CHARACTERS.chars() {
            let password = format!("Abc12345{}", c);
            assert!(
                validate_password_policy(&password).is_empty(),
                "'{}' should count as a special character",
                c
            );
        }
    }

    #[test]
    fn test_policy_empty_password_violates_everything() {
        assert_eq!(validate_password_policy("").len(), 5);
    }
}
