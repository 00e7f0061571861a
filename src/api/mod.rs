//! API handlers for the attendance REST endpoints

pub mod attendance;
pub mod auth;
pub mod form;
pub mod health;
pub mod openapi;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::AppError,
    models::user::{SessionClaims, SessionContext},
    AppState,
};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "session";

/// Extractor for the authenticated session.
///
/// The token is read from an `Authorization: Bearer` header, falling back to
/// the session cookie set at login.
pub struct AuthenticatedUser(pub SessionContext);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = match parts.headers.get(AUTHORIZATION) {
            Some(value) => {
                let header = value
                    .to_str()
                    .map_err(|_| AppError::Authentication("Invalid authorization header".to_string()))?;
                header
                    .strip_prefix("Bearer ")
                    .ok_or_else(|| {
                        AppError::Authentication("Invalid authorization header format".to_string())
                    })?
                    .to_string()
            }
            None => CookieJar::from_headers(&parts.headers)
                .get(SESSION_COOKIE)
                .map(|cookie| cookie.value().to_string())
                .ok_or_else(|| AppError::Authentication("Not logged in".to_string()))?,
        };

        let claims = SessionClaims::from_token(&token, &state.config.auth.session_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims.into()))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        // Own week
        .route("/attendance", get(attendance::get_my_week).post(attendance::submit_my_week))
        // Administration
        .route("/admin/users", get(users::list_users).post(users::create_user))
        .route(
            "/admin/users/:student_id/attendance",
            get(attendance::get_student_week).post(attendance::submit_student_week),
        )
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
