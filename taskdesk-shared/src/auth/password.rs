/// Password hashing with Argon2id
///
/// Registration and password change store the PHC string produced here;
/// login and the profile page verify against it. A fresh random salt is
/// generated for every hash, so hashing the same password twice yields two
/// different strings that both verify.
///
/// # Parameters
///
/// - Memory: 64 MB
/// - Iterations: 3
/// - Parallelism: 4 lanes
/// - Output: 32 bytes
///
/// # Example
///
/// ```
/// use taskdesk_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("secret1")?;
/// assert!(verify_password("secret1", &hash)?);
/// assert!(!verify_password("secret2", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, ParamsBuilder, Version,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Hash generation failed
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Verification failed for a reason other than a wrong password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Stored hash is not a valid PHC string
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = ParamsBuilder::new()
        .m_cost(65536)
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a plaintext password into a salted PHC string
///
/// Output looks like `$argon2id$v=19$m=65536,t=3,p=4$<salt>$<hash>`.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Checks a plaintext password against a stored hash
///
/// Returns `Ok(false)` for a wrong password and `Err` only when the stored
/// hash itself cannot be used.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

    // Parameters are read back from the PHC string
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_format() {
        let hash = hash_password("secret1").expect("Hash should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
        assert!(!hash.contains("secret1"));
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let first = hash_password("secret1").expect("Hash should succeed");
        let second = hash_password("secret1").expect("Hash should succeed");

        assert_ne!(first, second);
        assert!(verify_password("secret1", &first).unwrap());
        assert!(verify_password("secret1", &second).unwrap());
    }

    #[test]
    fn test_only_exact_password_verifies() {
        let hash = hash_password("secret1").expect("Hash should succeed");

        assert!(verify_password("secret1", &hash).unwrap());
        for wrong in ["secret", "secret12", "Secret1", " secret1", "secret1 ", ""] {
            assert!(
                !verify_password(wrong, &hash).unwrap(),
                "'{}' must not verify",
                wrong
            );
        }
    }

    #[test]
    fn test_unicode_password() {
        let hash = hash_password("kata-sandi-密码").expect("Hash should succeed");
        assert!(verify_password("kata-sandi-密码", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_invalid_hash() {
        assert!(matches!(
            verify_password("secret1", "not-a-phc-string"),
            Err(PasswordError::InvalidHash(_))
        ));
        assert!(verify_password("secret1", "$argon2id$broken").is_err());
    }
}
