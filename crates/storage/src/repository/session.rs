use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Session, User};

pub struct SessionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SessionRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: i64) -> Result<Session> {
        let token = Uuid::new_v4().to_string();

        let session = sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (token, user_id) VALUES (?, ?) RETURNING *",
        )
        .bind(&token)
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(session)
    }

    /// Resolve a session token to its user.
    pub async fn find_user(&self, token: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.*
            FROM users u
            INNER JOIN sessions s ON s.user_id = u.id
            WHERE s.token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(user)
    }

    pub async fn delete(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
