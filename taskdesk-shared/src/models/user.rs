/// User model and database operations
///
/// Users are created by registration and changed only through the profile
/// page (name, email, password). Accounts are never deleted in-app; an
/// account with `is_active = false` simply cannot log in.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     username VARCHAR(50) NOT NULL,
///     email VARCHAR(255) NOT NULL,
///     password_hash VARCHAR(255) NOT NULL,
///     full_name VARCHAR(100) NOT NULL,
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT users_username_key UNIQUE (username),
///     CONSTRAINT users_email_key UNIQUE (email)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskdesk_shared::models::user::{CreateUser, User};
/// use taskdesk_shared::auth::password::hash_password;
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let user = User::create(&pool, CreateUser {
///     username: "alice".to_string(),
///     email: "alice@example.com".to_string(),
///     password_hash: hash_password("secret1")?,
///     full_name: "Alice".to_string(),
/// })
/// .await?;
///
/// let matches = User::find_active_by_login(&pool, "alice@example.com").await?;
/// assert_eq!(matches.len(), 1);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Unique constraint on `users.username`
pub const USERNAME_CONSTRAINT: &str = "users_username_key";

/// Unique constraint on `users.email`
pub const EMAIL_CONSTRAINT: &str = "users_email_key";

/// User account
///
/// The password is only ever held as an Argon2id PHC string.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,

    /// Login name, unique across all users
    pub username: String,

    /// Email address, unique across all users
    pub email: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Display name
    pub full_name: String,

    /// Inactive accounts cannot log in
    pub is_active: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,

    /// Argon2id hash, NOT the plaintext password
    pub password_hash: String,

    pub full_name: String,
}

const USER_COLUMNS: &str =
    "id, username, email, password_hash, full_name, is_active, created_at, updated_at";

impl User {
    /// Inserts a new active user
    ///
    /// # Errors
    ///
    /// A duplicate username or email surfaces as a database error on
    /// [`USERNAME_CONSTRAINT`] or [`EMAIL_CONSTRAINT`].
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, full_name) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&query)
            .bind(data.username)
            .bind(data.email)
            .bind(data.password_hash)
            .bind(data.full_name)
            .fetch_one(pool)
            .await
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Active users whose username OR email equals `login`
    ///
    /// Login succeeds only when exactly one row comes back. Two rows are
    /// possible when one user's username equals another user's email.
    pub async fn find_active_by_login(pool: &PgPool, login: &str) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM users WHERE (username = $1 OR email = $1) AND is_active = TRUE",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&query)
            .bind(login)
            .fetch_all(pool)
            .await
    }

    /// Whether any user already has this username
    pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(pool)
            .await
    }

    /// Whether any user already has this email
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await
    }

    /// Whether a user other than `user_id` already has this email
    pub async fn email_taken_by_other(
        pool: &PgPool,
        email: &str,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1 AND id <> $2)")
            .bind(email)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Updates display name and email
    ///
    /// Returns the updated user, or None if the row no longer exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: Uuid,
        full_name: &str,
        email: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET full_name = $2, email = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(full_name)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Replaces the stored password hash
    pub async fn update_password(
        pool: &PgPool,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
