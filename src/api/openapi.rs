//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{attendance, auth, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dormitory Attendance API",
        version = "0.1.0",
        description = "Weekly meal and overnight declarations for dormitory students"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::logout,
        auth::me,
        // Attendance
        attendance::get_my_week,
        attendance::submit_my_week,
        // Admin
        users::list_users,
        users::create_user,
        attendance::get_student_week,
        attendance::submit_student_week,
    ),
    components(
        schemas(
            auth::LoginRequest,
            auth::LoginResponse,
            attendance::SubmitResponse,
            crate::models::attendance::AttendanceRecord,
            crate::models::attendance::WeekView,
            crate::models::user::Role,
            crate::models::user::User,
            crate::models::user::UserShort,
            crate::models::user::CreateUser,
            crate::models::user::SessionContext,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "attendance", description = "Own weekly declarations"),
        (name = "admin", description = "User and declaration administration")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
