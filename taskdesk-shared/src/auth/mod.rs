/// Authentication primitives
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`session_token`]: Login cookie tokens and their stored hashes
///
/// # Example
///
/// ```
/// use taskdesk_shared::auth::password::{hash_password, verify_password};
/// use taskdesk_shared::auth::session_token::{generate_session_token, hash_session_token};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("secret1")?;
/// assert!(verify_password("secret1", &hash)?);
///
/// let (token, token_hash) = generate_session_token();
/// assert_eq!(hash_session_token(&token), token_hash);
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod session_token;
