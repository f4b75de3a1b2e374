/// Configuration management for the news service
///
/// Values come from code defaults, then a `.env` file, then environment
/// variables prefixed with `NEWS` using `__` as the section separator,
/// e.g. `NEWS__SERVER__PORT=9000` or `NEWS__DATABASE__URL=postgres://...`.
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub stories: StoriesConfig,
    pub cors: CorsConfig,
    pub log: LogConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Apply embedded migrations at startup
    pub run_migrations: bool,
}

/// Cookie session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_hours: i64,
    /// Mark the cookie `Secure` (HTTPS only)
    pub secure_cookie: bool,
    /// How often the reaper deletes expired sessions
    pub reap_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "sessionid".to_string(),
            ttl_hours: 24 * 14,
            secure_cookie: false,
            reap_interval_secs: 3600,
        }
    }
}

impl SessionConfig {
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.ttl_hours)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoriesConfig {
    /// Only let an author delete their own stories
    pub restrict_delete_to_owner: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from defaults, `.env` and the environment
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("app.env", "development")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("database.url", "postgres://localhost/news")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.run_migrations", true)?
            .set_default("session.cookie_name", "sessionid")?
            .set_default("session.ttl_hours", 24 * 14)?
            .set_default("session.secure_cookie", false)?
            .set_default("session.reap_interval_secs", 3600)?
            .set_default("stories.restrict_delete_to_owner", false)?
            .set_default("cors.allowed_origins", "http://localhost:3000")?
            .set_default("log.format", "pretty")?
            .add_source(
                config::Environment::with_prefix("NEWS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that are unsafe or meaningless
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.session.ttl_hours <= 0 {
            bail!("session.ttl_hours must be positive");
        }
        if self.session.cookie_name.trim().is_empty() {
            bail!("session.cookie_name must not be empty");
        }
        if self.app.is_production() {
            if self.cors.allowed_origins.trim() == "*" {
                bail!("cors.allowed_origins cannot be '*' in production");
            }
            if !self.session.secure_cookie {
                bail!("session.secure_cookie must be enabled in production");
            }
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
