/// Session token generation and hashing
///
/// The browser cookie carries a random token; the `sessions` table stores
/// only the SHA-256 of it. A leaked table therefore cannot be replayed as
/// cookies.
///
/// # Example
///
/// ```
/// use taskdesk_shared::auth::session_token::{generate_session_token, hash_session_token};
///
/// let (token, hash) = generate_session_token();
/// assert_eq!(token.len(), 43);
/// assert_eq!(hash, hash_session_token(&token));
/// ```

use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of a session token (base62 characters, roughly 256 bits)
pub const SESSION_TOKEN_LENGTH: usize = 43;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generates a new token and its storage hash
///
/// Returns `(plaintext_token, sha256_hex)`.
pub fn generate_session_token() -> (String, String) {
    let mut rng = rand::thread_rng();
    let token: String = (0..SESSION_TOKEN_LENGTH)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    let hash = hash_session_token(&token);

    (token, hash)
}

/// Hex-encoded SHA-256 of a token
pub fn hash_session_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Cheap shape check run before any database lookup
pub fn is_well_formed(token: &str) -> bool {
    token.len() == SESSION_TOKEN_LENGTH && token.bytes().all(|b| b.is_ascii_alphanumeric())
}
