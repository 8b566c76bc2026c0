use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use storage::{
    Database,
    dto::auth::{LoginRequest, RegisterRequest},
    dto::user::UserResponse,
};
use validator::Validate;

use crate::error::WebError;
use crate::extract::{CurrentUser, SESSION_COOKIE};

use super::services;

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation error or disallowed role"),
        (status = 409, description = "Username or email already taken")
    ),
    tag = "auth"
)]
pub async fn register(
    State(db): State<Database>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let user = services::register(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))).into_response())
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, session cookie set", body = UserResponse),
        (status = 400, description = "Invalid credentials or unconfirmed account")
    ),
    tag = "auth"
)]
pub async fn login(
    State(db): State<Database>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let (user, session) = services::login(db.pool(), &req).await?;

    let cookie = Cookie::build((SESSION_COOKIE, session.token))
        .path("/")
        .http_only(true)
        .build();

    Ok((jar.add(cookie), Json(UserResponse::from(user))).into_response())
}

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 303, description = "Session closed, redirect to login")
    ),
    tag = "auth"
)]
pub async fn logout(
    State(db): State<Database>,
    _user: CurrentUser,
    jar: CookieJar,
) -> Result<Response, WebError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        services::logout(db.pool(), cookie.value()).await?;
    }

    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();

    Ok((jar.remove(removal), Redirect::to("/login")).into_response())
}
