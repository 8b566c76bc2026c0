use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::Group;

pub struct GroupRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> GroupRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Group>> {
        let groups = sqlx::query_as::<_, Group>("SELECT * FROM groups ORDER BY name")
            .fetch_all(self.pool)
            .await?;

        Ok(groups)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Group>> {
        let group = sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE name = ?")
            .bind(name)
            .fetch_optional(self.pool)
            .await?;

        Ok(group)
    }

    pub async fn create(&self, name: &str) -> Result<Group> {
        let group = sqlx::query_as::<_, Group>("INSERT INTO groups (name) VALUES (?) RETURNING *")
            .bind(name)
            .fetch_one(self.pool)
            .await?;

        Ok(group)
    }
}
