use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::Competition;

pub struct CompetitionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CompetitionRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Competition>> {
        let competitions = sqlx::query_as::<_, Competition>(
            "SELECT * FROM competitions WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(competitions)
    }
}
