use serde::Serialize;
use uuid::Uuid;

/// Login identity owned by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub username: String,
}

/// Display identity bound one-to-one to a user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Author {
    pub id: i64,
    pub user_id: Uuid,
    pub name: String,
}

/// Upper bound on `Author::name`
pub const AUTHOR_NAME_MAX: usize = 64;
