use sqlx::SqlitePool;

use crate::error::{Result, StorageError};
use crate::models::{Competition, Transaction, TransactionType};

/// All accrual writes go through here. Each method pairs the ledger
/// insert with a relative `points = points + ?` update inside one
/// database transaction, so the cached total can never diverge from
/// the ledger and concurrent awards cannot lose updates.
pub struct LedgerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LedgerRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a signed adjustment and apply it to the user's total.
    pub async fn record(
        &self,
        user_id: i64,
        delta: i64,
        transaction_type: TransactionType,
        reason: Option<&str>,
        comment: Option<&str>,
        awarded_by_id: Option<i64>,
    ) -> Result<Transaction> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query("UPDATE users SET points = points + ? WHERE id = ?")
            .bind(delta)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (user_id, points, transaction_type, reason, comment, awarded_by_id)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(delta)
        .bind(transaction_type)
        .bind(reason)
        .bind(comment)
        .bind(awarded_by_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(transaction)
    }

    /// Credit a competition award; the competitions row is the ledger entry.
    #[allow(clippy::too_many_arguments)]
    pub async fn award_competition(
        &self,
        user_id: i64,
        awarded_by_id: i64,
        name: &str,
        level: i64,
        quality: i64,
        place: i64,
        communication: i64,
        total: i64,
    ) -> Result<Competition> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query("UPDATE users SET points = points + ? WHERE id = ?")
            .bind(total)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        let competition = sqlx::query_as::<_, Competition>(
            r#"
            INSERT INTO competitions (name, level, quality, place, communication, user_id, awarded_by_id)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(level)
        .bind(quality)
        .bind(place)
        .bind(communication)
        .bind(user_id)
        .bind(awarded_by_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(competition)
    }

    /// Bulk-reward path: one competition row plus one reward transaction
    /// for a single participant, all in the same database transaction.
    #[allow(clippy::too_many_arguments)]
    pub async fn reward_for_competition(
        &self,
        user_id: i64,
        awarded_by_id: i64,
        name: &str,
        level: i64,
        quality: i64,
        place: i64,
        comment: Option<&str>,
        total: i64,
    ) -> Result<(Competition, Transaction)> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query("UPDATE users SET points = points + ? WHERE id = ?")
            .bind(total)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        let competition = sqlx::query_as::<_, Competition>(
            r#"
            INSERT INTO competitions (name, level, quality, place, communication, user_id, awarded_by_id)
            VALUES (?, ?, ?, ?, 0, ?, ?)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(level)
        .bind(quality)
        .bind(place)
        .bind(user_id)
        .bind(awarded_by_id)
        .fetch_one(&mut *tx)
        .await?;

        let reason = format!("Competition participation: {name}");
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (user_id, points, transaction_type, reason, comment, awarded_by_id)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(total)
        .bind(TransactionType::Reward)
        .bind(reason)
        .bind(comment)
        .bind(awarded_by_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((competition, transaction))
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Transaction>> {
        let transactions = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(transactions)
    }

    pub async fn page(&self, limit: i64, offset: i64) -> Result<Vec<Transaction>> {
        let transactions = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(transactions)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM transactions")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Sum of one user's ledger deltas; equals `users.points` by invariant.
    pub async fn sum_for_user(&self, user_id: i64) -> Result<i64> {
        let sum = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(points), 0) FROM transactions WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(sum)
    }
}
