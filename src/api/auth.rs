//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::user::{Role, SessionContext},
};

use super::{AuthenticatedUser, SESSION_COOKIE};

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Student id (login name)
    pub student_id: String,
    pub password: String,
}

/// Login response
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub role: Role,
    /// Where the client should go next
    pub redirect: String,
}

/// Log in and open a session
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = LoginResponse),
        (status = 401, description = "Invalid student id or password")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let (token, role) = state
        .services
        .users
        .authenticate(&request.student_id, &request.password)
        .await?;

    let ttl_hours = state.config.auth.session_ttl_hours;
    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .secure(state.config.auth.secure_cookie)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(ttl_hours as i64))
        .build();

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: ttl_hours * 3600,
            role,
            redirect: role.landing_path().to_string(),
        }),
    ))
}

/// Close the session by expiring the cookie
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 204, description = "Session cookie cleared")
    )
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        StatusCode::NO_CONTENT,
    )
}

/// Current session
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current session", body = SessionContext),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(AuthenticatedUser(session): AuthenticatedUser) -> Json<SessionContext> {
    Json(session)
}
