use sqlx::SqlitePool;
use storage::{
    dto::common::{PaginationMeta, PaginationParams},
    dto::ranking::{LeaderboardEntry, LeaderboardResponse},
    dto::user::UserResponse,
    error::Result,
    models::User,
    repository::user::UserRepository,
};

/// One leaderboard page, plus the caller's own rank when known.
pub async fn leaderboard(
    pool: &SqlitePool,
    pagination: &PaginationParams,
    current_user: Option<&User>,
) -> Result<LeaderboardResponse> {
    let repo = UserRepository::new(pool);

    let total_items = repo.count().await?;
    let offset = pagination.offset() as i64;
    let page = repo
        .leaderboard_page(pagination.limit() as i64, offset)
        .await?;

    let data = page
        .into_iter()
        .enumerate()
        .map(|(i, user)| LeaderboardEntry {
            rank: offset + i as i64 + 1,
            user: UserResponse::from(user),
        })
        .collect();

    let my_rank = match current_user {
        Some(user) => Some(repo.rank_of(user.points).await?),
        None => None,
    };

    Ok(LeaderboardResponse {
        data,
        pagination: PaginationMeta::new(pagination.page, pagination.page_size, total_items),
        my_rank,
    })
}
