use sqlx::SqlitePool;
use storage::{
    dto::common::PaginatedResponse,
    dto::ledger::{LedgerPageParams, PointsHistoryResponse},
    dto::user::UserResponse,
    models::{Transaction, User},
    repository::ledger::LedgerRepository,
};

use crate::error::WebResult;

pub async fn points_history(pool: &SqlitePool, user: User) -> WebResult<PointsHistoryResponse> {
    let transactions = LedgerRepository::new(pool).list_for_user(user.id).await?;

    Ok(PointsHistoryResponse {
        user: UserResponse::from(user),
        transactions,
    })
}

pub async fn transactions_page(
    pool: &SqlitePool,
    params: &LedgerPageParams,
) -> WebResult<PaginatedResponse<Transaction>> {
    let ledger = LedgerRepository::new(pool);
    let total = ledger.count().await?;
    let transactions = ledger
        .page(i64::from(params.limit()), i64::from(params.offset()))
        .await?;

    Ok(PaginatedResponse::new(
        transactions,
        params.page,
        params.per_page,
        total,
    ))
}
