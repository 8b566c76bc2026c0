use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TransactionType {
    Reward,
    Penalty,
    Award,
}

/// Immutable ledger entry. `points` is the signed delta applied to the
/// user's total; penalties are stored negative.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub points: i64,
    pub transaction_type: TransactionType,
    pub reason: Option<String>,
    pub comment: Option<String>,
    pub awarded_by_id: Option<i64>,
    pub created_at: chrono::NaiveDateTime,
}
