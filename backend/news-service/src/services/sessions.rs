use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::Result;

/// An issued login session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn issue(user_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Server-side session records keyed by the id carried in the cookie
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, user_id: Uuid, ttl: Duration) -> Result<Session>;

    /// User id of a live session; `None` if unknown, revoked or expired
    async fn resolve(&self, session_id: Uuid) -> Result<Option<Uuid>>;

    /// Revoking an unknown or already revoked session is not an error
    async fn revoke(&self, session_id: Uuid) -> Result<()>;

    /// Drop expired and revoked sessions, returning how many were removed
    async fn purge_expired(&self) -> Result<u64>;
}
