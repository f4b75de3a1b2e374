/// Login and logout handlers
use actix_web::{http::header::ContentType, web, HttpResponse};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::middleware::{removal_cookie, session_cookie, SessionContext};
use crate::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to The Josh Boult News Agency";
pub const GOODBYE_MESSAGE: &str = "Goodbye, visit The Josh Boult News Agency soon!";

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Authenticate form credentials and issue a session cookie
pub async fn login(
    state: web::Data<AppState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();

    let Some(account) = state
        .auth
        .authenticate(&form.username, &form.password)
        .await?
    else {
        tracing::info!(username = %form.username, "Login rejected");
        return Err(AppError::InvalidLogin);
    };

    // A new login never reuses the session id the client arrived with
    if let Some(previous) = session.session_id() {
        state.sessions.revoke(previous).await?;
    }

    let issued = state
        .sessions
        .create(account.id, state.session_config.ttl())
        .await?;

    tracing::info!(user_id = %account.id, username = %account.username, "User logged in");

    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .cookie(session_cookie(&state.session_config, &issued))
        .body(WELCOME_MESSAGE))
}

/// End the current session; succeeds whether or not one existed
pub async fn logout(state: web::Data<AppState>, session: SessionContext) -> Result<HttpResponse> {
    if let Some(session_id) = session.session_id() {
        state.sessions.revoke(session_id).await?;
        tracing::info!(%session_id, user_id = ?session.user_id(), "User logged out");
    }

    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .cookie(removal_cookie(&state.session_config))
        .body(GOODBYE_MESSAGE))
}
