/// Category model and database operations
///
/// Categories are per-user labels with a display color. Tasks reference
/// them weakly: deleting a category clears `tasks.category_id` instead of
/// deleting tasks. There is no category-management page; each account gets
/// a starter set at registration.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE categories (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     name VARCHAR(50) NOT NULL,
///     color VARCHAR(7) NOT NULL DEFAULT '#6c757d',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Color used when a category has none
pub const DEFAULT_COLOR: &str = "#6c757d";

/// Categories created for every new account as `(name, color)`
pub const STARTER_CATEGORIES: [(&str, &str); 3] = [
    ("Pekerjaan", "#4361ee"),
    ("Pribadi", "#2a9d8f"),
    ("Belajar", "#f4a261"),
];

/// A user's task category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,

    /// CSS color, `#rrggbb`
    pub color: String,
}

impl Category {
    /// Inserts one category
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        name: &str,
        color: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (user_id, name, color)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, color
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(color)
        .fetch_one(pool)
        .await
    }

    /// Seeds [`STARTER_CATEGORIES`] for a freshly registered user
    ///
    /// Statements run one by one; a failure part-way leaves the earlier
    /// categories in place.
    pub async fn create_starter_set(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let mut created = Vec::with_capacity(STARTER_CATEGORIES.len());
        for (name, color) in STARTER_CATEGORIES {
            created.push(Self::create(pool, user_id, name, color).await?);
        }
        Ok(created)
    }

    /// A user's categories sorted by name, for the add-task dropdown
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, user_id, name, color
            FROM categories
            WHERE user_id = $1
            ORDER BY name
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Finds a category only if `user_id` owns it
    pub async fn find_owned(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "SELECT id, user_id, name, color FROM categories WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}
