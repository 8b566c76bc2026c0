use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub event: Option<String>,
    pub level: Option<i64>,
    pub place: Option<i64>,
    pub quality: Option<i64>,
    pub user_id: i64,
    pub created_at: chrono::NaiveDateTime,
}
