use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::performance::{
        PerformanceUpdateOutcome, WeeklyAdjustRequest, WeeklyScoresUpdate, WeeklySheetQuery,
        WeeklySheetResponse,
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::extract::Staff;

use super::services;

#[utoipa::path(
    get,
    path = "/weekly_performance",
    params(WeeklySheetQuery),
    responses(
        (status = 200, description = "Weekly sheet for the selected week", body = WeeklySheetResponse)
    ),
    tag = "performance"
)]
pub async fn weekly_sheet(
    State(db): State<Database>,
    _staff: Staff,
    Query(query): Query<WeeklySheetQuery>,
) -> Result<Response, WebError> {
    let date = query
        .date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    let sheet = services::weekly_sheet(db.pool(), date, query.group_id).await?;

    Ok(Json(sheet).into_response())
}

#[utoipa::path(
    post,
    path = "/weekly_performance",
    request_body = WeeklyAdjustRequest,
    responses(
        (status = 200, description = "Points adjusted", body = PerformanceUpdateOutcome),
        (status = 400, description = "Invalid action"),
        (status = 404, description = "Student not found")
    ),
    tag = "performance"
)]
pub async fn weekly_adjust(
    State(db): State<Database>,
    Staff(awarder): Staff,
    Json(req): Json<WeeklyAdjustRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let outcome = services::adjust_from_sheet(db.pool(), &awarder, &req).await?;

    Ok(Json(outcome).into_response())
}

#[utoipa::path(
    post,
    path = "/update_weekly_performance",
    request_body = WeeklyScoresUpdate,
    responses(
        (status = 200, description = "Sub-scores rewritten", body = PerformanceUpdateOutcome),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Weekly performance record not found")
    ),
    tag = "performance"
)]
pub async fn update_weekly(
    State(db): State<Database>,
    _staff: Staff,
    Json(req): Json<WeeklyScoresUpdate>,
) -> Result<Response, WebError> {
    req.validate()?;

    let outcome = services::update_weekly(db.pool(), &req).await?;

    Ok(Json(outcome).into_response())
}
