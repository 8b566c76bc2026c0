use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::user::{ConfirmUserRequest, UserAwardsResponse, UserResponse},
};

use crate::error::WebError;
use crate::extract::{AdminUser, CurrentUser};

use super::services;

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All accounts, ordered by name", body = [UserResponse])
    ),
    tag = "users"
)]
pub async fn list_users(
    State(db): State<Database>,
    _current_user: CurrentUser,
) -> Result<Response, WebError> {
    let users = services::all_users(db.pool()).await?;

    Ok(Json(users).into_response())
}

#[utoipa::path(
    get,
    path = "/manage_users",
    responses(
        (status = 200, description = "All non-admin accounts", body = [UserResponse])
    ),
    tag = "users"
)]
pub async fn manage_users(
    State(db): State<Database>,
    _admin: AdminUser,
) -> Result<Response, WebError> {
    let users = services::manageable_users(db.pool()).await?;

    Ok(Json(users).into_response())
}

#[utoipa::path(
    get,
    path = "/confirm_users",
    responses(
        (status = 200, description = "Accounts awaiting confirmation", body = [UserResponse])
    ),
    tag = "users"
)]
pub async fn pending_users(
    State(db): State<Database>,
    _admin: AdminUser,
) -> Result<Response, WebError> {
    let users = services::pending_users(db.pool()).await?;

    Ok(Json(users).into_response())
}

#[utoipa::path(
    post,
    path = "/confirm_users",
    request_body = ConfirmUserRequest,
    responses(
        (status = 204, description = "Account confirmed"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn confirm_user(
    State(db): State<Database>,
    _admin: AdminUser,
    Json(req): Json<ConfirmUserRequest>,
) -> Result<Response, WebError> {
    services::confirm_user(db.pool(), req.user_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    post,
    path = "/delete_user/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(db): State<Database>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    services::delete_user(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/user/{id}/awards",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Everything awarded to the user", body = UserAwardsResponse),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn user_awards(
    State(db): State<Database>,
    _current_user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let awards = services::user_awards(db.pool(), id).await?;

    Ok(Json(awards).into_response())
}
