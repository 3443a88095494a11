/// Login session storage
///
/// A session row is the server-side half of the login cookie. It carries a
/// snapshot of the identity the pages display (username, email, full name)
/// so protected pages can render without re-reading `users`. The profile
/// page refreshes that snapshot when name or email change.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE sessions (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     token_hash CHAR(64) NOT NULL UNIQUE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     username VARCHAR(50) NOT NULL,
///     email VARCHAR(255) NOT NULL,
///     full_name VARCHAR(100) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     expires_at TIMESTAMPTZ NOT NULL
/// );
/// ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::session_token::{generate_session_token, hash_session_token};
use crate::models::user::User;

/// Stored session
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    pub id: Uuid,

    #[serde(skip_serializing)]
    pub token_hash: String,

    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is still usable at `now`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

const SESSION_COLUMNS: &str =
    "id, token_hash, user_id, username, email, full_name, created_at, expires_at";

impl Session {
    /// Opens a session for `user` lasting `ttl`
    ///
    /// Returns the stored row and the plaintext token for the cookie. The
    /// plaintext is not kept anywhere else.
    pub async fn start(
        pool: &PgPool,
        user: &User,
        ttl: Duration,
    ) -> Result<(Self, String), sqlx::Error> {
        let (token, token_hash) = generate_session_token();
        let query = format!(
            "INSERT INTO sessions (token_hash, user_id, username, email, full_name, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            SESSION_COLUMNS
        );

        let session = sqlx::query_as::<_, Session>(&query)
            .bind(token_hash)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(Utc::now() + ttl)
            .fetch_one(pool)
            .await?;

        Ok((session, token))
    }

    /// Resolves a cookie token to an unexpired session
    pub async fn find_active(pool: &PgPool, token: &str) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM sessions WHERE token_hash = $1 AND expires_at > NOW()",
            SESSION_COLUMNS
        );

        sqlx::query_as::<_, Session>(&query)
            .bind(hash_session_token(token))
            .fetch_optional(pool)
            .await
    }

    /// Mirrors a profile change into every open session of the user
    pub async fn refresh_identity(
        pool: &PgPool,
        user_id: Uuid,
        full_name: &str,
        email: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE sessions SET full_name = $2, email = $3 WHERE user_id = $1")
            .bind(user_id)
            .bind(full_name)
            .bind(email)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Ends the session behind a cookie token
    pub async fn end(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(hash_session_token(token))
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a user's expired sessions
    pub async fn purge_expired_for_user(pool: &PgPool, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1 AND expires_at <= NOW()")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
