use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Competition award event. The four scored dimensions sum to the point
/// total credited to the subject user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Competition {
    pub id: i64,
    pub name: String,
    pub level: i64,
    pub quality: i64,
    pub place: i64,
    pub communication: i64,
    pub user_id: i64,
    pub awarded_by_id: Option<i64>,
    pub created_at: chrono::NaiveDateTime,
}
