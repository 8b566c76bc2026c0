use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::award::{AwardOutcome, AwardRequest, BulkRewardOutcome, BulkRewardRequest, RewardContextResponse},
    dto::ledger::{AdjustOutcome, AdjustPointsRequest},
};
use validator::Validate;

use crate::error::WebError;
use crate::extract::Staff;

use super::services;

#[utoipa::path(
    post,
    path = "/award",
    request_body = AwardRequest,
    responses(
        (status = 201, description = "Award credited", body = AwardOutcome),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Subject user not found"),
        (status = 409, description = "Yearly evaluation already recorded")
    ),
    tag = "awards"
)]
pub async fn award(
    State(db): State<Database>,
    Staff(awarder): Staff,
    Json(req): Json<AwardRequest>,
) -> Result<Response, WebError> {
    let outcome = services::award(db.pool(), &awarder, &req).await?;

    Ok((StatusCode::CREATED, Json(outcome)).into_response())
}

#[utoipa::path(
    get,
    path = "/reward_punish",
    responses(
        (status = 200, description = "Groups and students for the reward form", body = RewardContextResponse)
    ),
    tag = "awards"
)]
pub async fn reward_context(
    State(db): State<Database>,
    _staff: Staff,
) -> Result<Response, WebError> {
    let context = services::reward_context(db.pool()).await?;

    Ok(Json(context).into_response())
}

#[utoipa::path(
    post,
    path = "/reward_punish",
    request_body = BulkRewardRequest,
    responses(
        (status = 200, description = "Selected students rewarded", body = BulkRewardOutcome),
        (status = 400, description = "Validation error")
    ),
    tag = "awards"
)]
pub async fn reward_punish(
    State(db): State<Database>,
    Staff(awarder): Staff,
    Json(req): Json<BulkRewardRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let outcome = services::reward_participants(db.pool(), &awarder, &req).await?;

    Ok(Json(outcome).into_response())
}

#[utoipa::path(
    post,
    path = "/award_points",
    request_body = AdjustPointsRequest,
    responses(
        (status = 200, description = "Points adjusted", body = AdjustOutcome),
        (status = 400, description = "Invalid transaction type"),
        (status = 404, description = "User not found")
    ),
    tag = "awards"
)]
pub async fn award_points(
    State(db): State<Database>,
    Staff(awarder): Staff,
    Json(req): Json<AdjustPointsRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let outcome = services::adjust_points(db.pool(), &awarder, &req).await?;

    Ok(Json(outcome).into_response())
}
