/// News Service Library
///
/// Backend for The Josh Boult News Agency: authors log in, publish and
/// delete stories, and anyone can list stories filtered by category, region
/// and date.
///
/// # Modules
///
/// - `handlers`: HTTP endpoints for login, logout and the story operations
/// - `models`: Stories, authors and the wire enumerations
/// - `services`: Store, auth and session seams plus password hashing
/// - `db`: PostgreSQL and in-memory implementations of those seams
/// - `middleware`: Session cookie extraction
/// - `jobs`: Background session cleanup
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod middleware;
pub mod models;
pub mod services;

use std::sync::Arc;

pub use config::Config;
pub use error::{AppError, Result};

use config::{SessionConfig, StoriesConfig};
use services::{AuthProvider, SessionStore, StoryStore};

/// Shared state handed to every handler through `web::Data`
#[derive(Clone)]
pub struct AppState {
    pub stories: Arc<dyn StoryStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub sessions: Arc<dyn SessionStore>,
    pub session_config: SessionConfig,
    pub stories_config: StoriesConfig,
}
