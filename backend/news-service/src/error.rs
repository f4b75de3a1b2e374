/// Error types for the news service
///
/// Every error renders as a `text/plain` response whose body is the error
/// message, matching the plain text bodies of the success paths.
use actix_web::{
    error::{ResponseError, UrlencodedError},
    http::{header::ContentType, StatusCode},
    HttpRequest, HttpResponse,
};
use thiserror::Error;

/// Result type for news-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Wrong HTTP verb for an endpoint; carries the verb that is allowed
    #[error("Only {0} requests are permitted for this resource\n")]
    MethodNotAllowed(&'static str),

    /// Write attempted without an authenticated session
    #[error("User is not authenticated")]
    NotAuthenticated,

    /// Credentials rejected by the auth provider
    #[error("Invalid login")]
    InvalidLogin,

    /// Malformed body, missing field or out-of-range value
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed(_) => StatusCode::BAD_REQUEST,
            // Kept for compatibility with existing clients of the agency API
            AppError::NotAuthenticated => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InvalidLogin => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Database(e) => {
                tracing::error!(error = ?e, "Database error");
                "Internal server error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(body)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("Invalid JSON body: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Invalid request: {}", errors))
    }
}

/// Rejection hook for `web::Form` extractors
pub fn form_error_handler(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected form body");
    AppError::Validation(format!("Invalid form body: {}", err)).into()
}
