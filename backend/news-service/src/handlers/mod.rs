/// HTTP handlers for the news agency API
///
/// Each endpoint accepts exactly one verb. Any other verb on the same path is
/// answered by a fallback that reports the permitted verb.
pub mod auth;
pub mod health;
pub mod stories;

pub use auth::{login, logout};
pub use health::health;
pub use stories::{delete_story, get_stories, post_story};

use actix_web::{web, HttpResponse};
use serde::de::DeserializeOwned;

use crate::error::{form_error_handler, AppError, Result};

/// Register every route under `/api`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(form_error_handler))
        .service(
            web::scope("/api")
                .service(
                    web::resource("/login")
                        .route(web::post().to(login))
                        .default_service(web::to(post_only)),
                )
                .service(
                    web::resource("/logout")
                        .route(web::post().to(logout))
                        .default_service(web::to(post_only)),
                )
                .service(
                    web::resource("/poststory")
                        .route(web::post().to(post_story))
                        .default_service(web::to(post_only)),
                )
                .service(
                    web::resource("/getstories")
                        .route(web::get().to(get_stories))
                        .default_service(web::to(get_only)),
                )
                .service(
                    web::resource("/deletestory")
                        .route(web::post().to(delete_story))
                        .default_service(web::to(post_only)),
                )
                .route("/health", web::get().to(health)),
        );
}

async fn post_only() -> Result<HttpResponse> {
    Err(AppError::MethodNotAllowed("POST"))
}

async fn get_only() -> Result<HttpResponse> {
    Err(AppError::MethodNotAllowed("GET"))
}

/// Decode a JSON request body regardless of its declared content type
pub(crate) fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::Validation("Request body must be a JSON object".into()));
    }
    Ok(serde_json::from_slice(body)?)
}
