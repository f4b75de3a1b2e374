/// User accounts and their author records
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Author, UserAccount};
use crate::services::{verify_password, AuthProvider};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
}

/// Auth provider backed by the `users` table
#[derive(Clone)]
pub struct PgAuthProvider {
    pool: PgPool,
}

impl PgAuthProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthProvider for PgAuthProvider {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Option<UserAccount>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash FROM users WHERE username = $1 AND is_active",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        if verify_password(password, &row.password_hash)? {
            Ok(Some(UserAccount {
                id: row.id,
                username: row.username,
            }))
        } else {
            Ok(None)
        }
    }
}

/// Create a user or replace the password of an existing one; returns the user id
pub async fn upsert_user(pool: &PgPool, username: &str, password_hash: &str) -> Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, username, password_hash)
        VALUES ($1, $2, $3)
        ON CONFLICT (username) DO UPDATE SET password_hash = EXCLUDED.password_hash
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Bind an author name to a user, renaming the author if one already exists
pub async fn ensure_author(pool: &PgPool, user_id: Uuid, name: &str) -> Result<Author> {
    let author = sqlx::query_as::<_, Author>(
        r#"
        INSERT INTO authors (user_id, name)
        VALUES ($1, $2)
        ON CONFLICT (user_id) DO UPDATE SET name = EXCLUDED.name
        RETURNING id, user_id, name
        "#,
    )
    .bind(user_id)
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(author)
}
