//! Weekly attendance endpoints

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Form, Json,
};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::attendance::WeekView};

use super::{form::FormEdits, AuthenticatedUser};

/// Response to a weekly form submission
#[derive(Serialize, ToSchema)]
pub struct SubmitResponse {
    /// Confirmation message, prefixed with the submission time
    pub message: String,
    /// The week as stored after the submission
    pub week: WeekView,
}

/// First day of the editable week: the server's current calendar date
fn reference_date() -> NaiveDate {
    Local::now().date_naive()
}

fn confirmation(message: &str) -> String {
    format!("[{}] {}", Local::now().format("%H:%M"), message)
}

/// Get the current week of the logged-in student
#[utoipa::path(
    get,
    path = "/attendance",
    tag = "attendance",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Seven days starting today", body = WeekView),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_my_week(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
) -> AppResult<Json<WeekView>> {
    let week = state
        .services
        .attendance
        .fetch_week(&session.student_id, reference_date())
        .await?;
    Ok(Json(week))
}

/// Submit the logged-in student's week; a checked meal box means "will eat"
#[utoipa::path(
    post,
    path = "/attendance",
    tag = "attendance",
    security(("bearer_auth" = [])),
    request_body(
        content = String,
        content_type = "application/x-www-form-urlencoded",
        description = "Fields `{breakfast|lunch|dinner|overnight}-YYYY-MM-DD=on` and `note-YYYY-MM-DD`"
    ),
    responses(
        (status = 200, description = "Week stored", body = SubmitResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn submit_my_week(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Form(fields): Form<HashMap<String, String>>,
) -> AppResult<Json<SubmitResponse>> {
    let reference = reference_date();
    let edits = FormEdits::from(fields);

    state
        .services
        .attendance
        .apply_week_as_attendance(&session.student_id, reference, &edits)
        .await?;

    let week = state
        .services
        .attendance
        .fetch_week(&session.student_id, reference)
        .await?;

    Ok(Json(SubmitResponse {
        message: confirmation("Submission received."),
        week,
    }))
}

/// Get the current week of any student (admin only)
#[utoipa::path(
    get,
    path = "/admin/users/{student_id}/attendance",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(
        ("student_id" = String, Path, description = "Student id")
    ),
    responses(
        (status = 200, description = "Seven days starting today", body = WeekView),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_student_week(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(student_id): Path<String>,
) -> AppResult<Json<WeekView>> {
    session.require_admin()?;
    state.services.users.role_of(&student_id).await?;

    let week = state
        .services
        .attendance
        .fetch_week(&student_id, reference_date())
        .await?;
    Ok(Json(week))
}

/// Edit any student's week (admin only); a checked meal box means "will skip"
#[utoipa::path(
    post,
    path = "/admin/users/{student_id}/attendance",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(
        ("student_id" = String, Path, description = "Student id")
    ),
    request_body(
        content = String,
        content_type = "application/x-www-form-urlencoded",
        description = "Fields `{breakfast|lunch|dinner|overnight}-YYYY-MM-DD=on` and `note-YYYY-MM-DD`"
    ),
    responses(
        (status = 200, description = "Week stored", body = SubmitResponse),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn submit_student_week(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(student_id): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> AppResult<Json<SubmitResponse>> {
    session.require_admin()?;
    state.services.users.role_of(&student_id).await?;

    let reference = reference_date();
    let edits = FormEdits::from(fields);

    state
        .services
        .attendance
        .apply_week_as_skip(&student_id, reference, &edits)
        .await?;

    tracing::info!(admin = %session.student_id, student_id = %student_id, "Admin edited week");

    let week = state
        .services
        .attendance
        .fetch_week(&student_id, reference)
        .await?;

    Ok(Json(SubmitResponse {
        message: confirmation("Student records updated."),
        week,
    }))
}
