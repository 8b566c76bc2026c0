use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{Database, dto::common::PaginationParams, dto::ranking::LeaderboardResponse};

use crate::error::WebError;
use crate::extract::CurrentUser;

use super::services;

#[utoipa::path(
    get,
    path = "/top_users",
    params(PaginationParams),
    responses(
        (status = 200, description = "Leaderboard page, points descending", body = LeaderboardResponse),
        (status = 400, description = "Invalid pagination parameters")
    ),
    tag = "leaderboard"
)]
pub async fn top_users(
    State(db): State<Database>,
    current_user: Option<CurrentUser>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let user = current_user.map(|CurrentUser(user)| user);
    let response = services::leaderboard(db.pool(), &pagination, user.as_ref()).await?;

    Ok(Json(response).into_response())
}
