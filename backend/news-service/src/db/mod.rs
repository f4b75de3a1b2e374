/// Database access layer
///
/// PostgreSQL implementations of the service seams live in the `*_repo`
/// modules; `memory` holds process-local implementations used by tests and
/// embedded deployments.
pub mod memory;
pub mod session_repo;
pub mod story_repo;
pub mod user_repo;

pub use memory::{InMemoryAuthProvider, InMemorySessionStore, InMemoryStoryStore};
pub use session_repo::PgSessionStore;
pub use story_repo::PgStoryStore;
pub use user_repo::PgAuthProvider;

use sqlx::PgPool;

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running database migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations completed");
    Ok(())
}
