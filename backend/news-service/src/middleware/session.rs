use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::error::AppError;
use crate::services::Session;
use crate::AppState;

/// Authentication state of the current request.
///
/// Built from the session cookie before the handler runs. A missing,
/// malformed, expired or revoked cookie produces an unauthenticated context
/// rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    session_id: Option<Uuid>,
    user_id: Option<Uuid>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(session_id: Uuid, user_id: Uuid) -> Self {
        Self {
            session_id: Some(session_id),
            user_id: Some(user_id),
        }
    }

    /// Session id presented by the client, whether or not it is still valid
    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn require_user(&self) -> crate::Result<Uuid> {
        self.user_id.ok_or(AppError::NotAuthenticated)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let presented = state.as_ref().and_then(|s| {
            req.cookie(&s.session_config.cookie_name)
                .map(|c| c.value().to_string())
        });

        Box::pin(async move {
            let state = state
                .ok_or_else(|| AppError::Internal("application state is not configured".into()))?;

            let Some(session_id) = presented.and_then(|v| Uuid::parse_str(&v).ok()) else {
                return Ok(SessionContext::anonymous());
            };

            let user_id = state.sessions.resolve(session_id).await?;
            if user_id.is_none() {
                tracing::debug!(%session_id, "Presented session is not live");
            }

            Ok(SessionContext {
                session_id: Some(session_id),
                user_id,
            })
        })
    }
}

/// Cookie carrying a freshly issued session
pub fn session_cookie(config: &SessionConfig, session: &Session) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), session.id.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookie)
        .max_age(time::Duration::hours(config.ttl_hours))
        .finish()
}

/// Cookie instructing the client to drop its session
pub fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build(config.cookie_name.clone(), "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookie)
        .finish();
    cookie.make_removal();
    cookie
}
