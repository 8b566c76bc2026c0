use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dto::common::PaginationMeta;
use crate::dto::user::UserResponse;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardResponse {
    pub data: Vec<LeaderboardEntry>,
    pub pagination: PaginationMeta,
    /// Rank of the authenticated caller: users with strictly more
    /// points, plus one. Absent for anonymous requests.
    pub my_rank: Option<i64>,
}
