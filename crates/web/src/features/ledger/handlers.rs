use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::ledger::{LedgerPageParams, PointsHistoryResponse},
    models::Transaction,
};

use crate::error::WebError;
use crate::extract::{CurrentUser, Staff};

use super::services;

#[utoipa::path(
    get,
    path = "/points",
    responses(
        (status = 200, description = "The caller's transaction history", body = PointsHistoryResponse)
    ),
    tag = "ledger"
)]
pub async fn points(
    State(db): State<Database>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, WebError> {
    let history = services::points_history(db.pool(), user).await?;

    Ok(Json(history).into_response())
}

#[utoipa::path(
    get,
    path = "/transactions",
    params(LedgerPageParams),
    responses(
        (status = 200, description = "One page of the global ledger, newest first", body = [Transaction])
    ),
    tag = "ledger"
)]
pub async fn transactions(
    State(db): State<Database>,
    _staff: Staff,
    Query(params): Query<LedgerPageParams>,
) -> Result<Response, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let page = services::transactions_page(db.pool(), &params).await?;

    Ok(Json(page).into_response())
}
