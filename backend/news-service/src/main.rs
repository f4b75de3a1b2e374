use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use db_pool::{create_pool as create_pg_pool, DbConfig as DbPoolConfig};
use news_service::config::{Config, LogFormat};
use news_service::db::{self, PgAuthProvider, PgSessionStore, PgStoryStore};
use news_service::jobs::start_session_reaper;
use news_service::{handlers, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn build_cors(allowed_origins: &str) -> Cors {
    let mut cors = Cors::default();
    let mut any_origin = false;
    for origin in allowed_origins.split(',') {
        let origin = origin.trim();
        if origin.is_empty() {
            continue;
        }
        if origin == "*" {
            any_origin = true;
            cors = cors.allow_any_origin();
        } else {
            cors = cors.allowed_origin(origin);
        }
    }
    cors = cors.allow_any_method().allow_any_header().max_age(3600);
    // Session cookies must be sent cross-origin by browser clients
    if !any_origin {
        cors = cors.supports_credentials();
    }
    cors
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    init_tracing(config.log.format);

    tracing::info!(
        env = %config.app.env,
        version = env!("CARGO_PKG_VERSION"),
        "Starting news-service"
    );

    let db_cfg = DbPoolConfig::new("news-service", config.database.url.clone()).with_connections(
        config.database.max_connections,
        config.database.min_connections,
    );
    db_cfg.log_config();
    let pool = create_pg_pool(db_cfg)
        .await
        .context("Database pool creation failed")?;

    if config.database.run_migrations {
        db::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
    }

    let state = AppState {
        stories: Arc::new(PgStoryStore::new(pool.clone())),
        auth: Arc::new(PgAuthProvider::new(pool.clone())),
        sessions: Arc::new(PgSessionStore::new(pool)),
        session_config: config.session.clone(),
        stories_config: config.stories.clone(),
    };

    actix_rt::spawn(start_session_reaper(
        state.sessions.clone(),
        Duration::from_secs(config.session.reap_interval_secs.max(1)),
    ));

    let bind_address = config.bind_address();
    tracing::info!(address = %bind_address, "Starting HTTP server");

    let state = web::Data::new(state);
    let allowed_origins = config.cors.allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(build_cors(&allowed_origins))
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("HTTP server terminated with an error")?;

    tracing::info!("news-service stopped");
    Ok(())
}
