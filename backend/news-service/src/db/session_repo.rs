use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::services::{Session, SessionStore};

/// Session store backed by the `sessions` table
#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn create(&self, user_id: Uuid, ttl: Duration) -> Result<Session> {
        let session = Session::issue(user_id, ttl);

        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(session.id)
        .bind(session.user_id)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(session)
    }

    async fn resolve(&self, session_id: Uuid) -> Result<Option<Uuid>> {
        let user_id: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT user_id
            FROM sessions
            WHERE id = $1 AND revoked_at IS NULL AND expires_at > $2
            "#,
        )
        .bind(session_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user_id.map(|(id,)| id))
    }

    async fn revoke(&self, session_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE sessions SET revoked_at = NOW() WHERE id = $1 AND revoked_at IS NULL")
            .bind(session_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64> {
        let result =
            sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW() OR revoked_at IS NOT NULL")
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }
}
