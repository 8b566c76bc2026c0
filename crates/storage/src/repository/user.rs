use sqlx::SqlitePool;

use crate::error::{Result, StorageError};
use crate::models::{Role, User};

/// Fields required to insert a new account.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub full_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
    pub group_id: Option<i64>,
    pub is_confirmed: bool,
}

pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewUser<'_>) -> Result<User> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, full_name, email, password_hash, role, points, group_id, is_confirmed)
            VALUES (?, ?, ?, ?, ?, 0, ?, ?)
            RETURNING *
            "#,
        )
        .bind(new.username)
        .bind(new.full_name)
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.role)
        .bind(new.group_id)
        .bind(new.is_confirmed)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from);

        match result {
            Err(e) if e.is_unique_violation() => Err(StorageError::ConstraintViolation(
                "username or email already taken".to_string(),
            )),
            Err(e) if e.is_foreign_key_violation() => Err(StorageError::ConstraintViolation(
                "unknown group".to_string(),
            )),
            other => other,
        }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<User> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY full_name")
            .fetch_all(self.pool)
            .await?;

        Ok(users)
    }

    /// Students, optionally restricted to one group
    pub async fn list_students(&self, group_id: Option<i64>) -> Result<Vec<User>> {
        let students = match group_id {
            Some(group_id) => {
                sqlx::query_as::<_, User>(
                    "SELECT * FROM users WHERE role = 'student' AND group_id = ? ORDER BY full_name",
                )
                .bind(group_id)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, User>(
                    "SELECT * FROM users WHERE role = 'student' ORDER BY full_name",
                )
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(students)
    }

    pub async fn list_non_admin(&self) -> Result<Vec<User>> {
        let users =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE role != 'admin' ORDER BY full_name")
                .fetch_all(self.pool)
                .await?;

        Ok(users)
    }

    pub async fn list_unconfirmed(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE is_confirmed = 0 ORDER BY created_at",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    pub async fn confirm(&self, id: i64) -> Result<()> {
        let result = sqlx::query("UPDATE users SET is_confirmed = 1 WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Delete a user; related ledger rows go with it via FK cascades.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// One leaderboard page: points descending, ties by insertion order.
    pub async fn leaderboard_page(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users ORDER BY points DESC, id ASC LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Rank = number of users with strictly more points, plus one.
    pub async fn rank_of(&self, points: i64) -> Result<i64> {
        let rank = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) + 1 FROM users WHERE points > ?",
        )
        .bind(points)
        .fetch_one(self.pool)
        .await?;

        Ok(rank)
    }
}
