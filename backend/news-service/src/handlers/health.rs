use actix_web::{web, HttpResponse};

use crate::AppState;

/// Liveness plus a store round trip
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    match state.stories.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "news-service",
            "version": env!("CARGO_PKG_VERSION"),
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Story store health check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "service": "news-service",
                "version": env!("CARGO_PKG_VERSION"),
            }))
        }
    }
}
