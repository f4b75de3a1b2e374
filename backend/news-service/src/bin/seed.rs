//! Database seed script for creating an author account
//! Run with: cargo run --bin seed
//!
//! Reads SEED_USERNAME, SEED_PASSWORD and SEED_AUTHOR_NAME. Running it again
//! for the same username resets the password and author name.

use anyhow::{bail, Context};
use db_pool::{create_pool, DbConfig};
use news_service::db::{self, user_repo};
use news_service::models::AUTHOR_NAME_MAX;
use news_service::services::hash_password;
use news_service::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    let username = std::env::var("SEED_USERNAME").unwrap_or_else(|_| "josh".to_string());
    let password = std::env::var("SEED_PASSWORD").context("SEED_PASSWORD must be set")?;
    let author_name =
        std::env::var("SEED_AUTHOR_NAME").unwrap_or_else(|_| "Josh Boult".to_string());

    if username.trim().is_empty() {
        bail!("SEED_USERNAME must not be empty");
    }
    if author_name.is_empty() || author_name.chars().count() > AUTHOR_NAME_MAX {
        bail!("SEED_AUTHOR_NAME must be 1-{} characters", AUTHOR_NAME_MAX);
    }

    println!("Connecting to database...");
    let pool = create_pool(DbConfig::new("news-seed", config.database.url.clone()).with_connections(1, 1))
        .await
        .context("Failed to connect to database")?;

    if config.database.run_migrations {
        db::run_migrations(&pool).await?;
    }

    println!("Hashing password...");
    let password_hash = hash_password(&password)?;

    let user_id = user_repo::upsert_user(&pool, &username, &password_hash).await?;
    let author = user_repo::ensure_author(&pool, user_id, &author_name).await?;

    println!("\n========================================");
    println!("Author Account Ready!");
    println!("========================================");
    println!("Username:  {}", username);
    println!("Author:    {} (id {})", author.name, author.id);
    println!("========================================");

    Ok(())
}
