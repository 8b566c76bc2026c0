use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::dto::performance::WeeklyScores;
use crate::error::{Result, StorageError};
use crate::models::{WeeklyPerformance, YearlyPerformance};
use crate::services::points;

pub struct PerformanceRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PerformanceRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch the weekly record for a (user, week) pair, creating it with
    /// zeroed sub-scores when missing.
    pub async fn ensure_weekly(
        &self,
        user_id: i64,
        week_start: NaiveDate,
    ) -> Result<WeeklyPerformance> {
        let (week, year) = points::iso_week_parts(week_start);

        let inserted = sqlx::query(
            r#"
            INSERT INTO weekly_performances (user_id, week_start, week, year)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (user_id, week_start) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(week_start)
        .bind(week)
        .bind(year)
        .execute(self.pool)
        .await
        .map_err(StorageError::from);

        if let Err(e) = inserted {
            // Unknown user surfaces as an FK failure on the insert.
            if e.is_foreign_key_violation() {
                return Err(StorageError::NotFound);
            }
            return Err(e);
        }

        self.find_weekly(user_id, week_start)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn find_weekly(
        &self,
        user_id: i64,
        week_start: NaiveDate,
    ) -> Result<Option<WeeklyPerformance>> {
        let performance = sqlx::query_as::<_, WeeklyPerformance>(
            "SELECT * FROM weekly_performances WHERE user_id = ? AND week_start = ?",
        )
        .bind(user_id)
        .bind(week_start)
        .fetch_optional(self.pool)
        .await?;

        Ok(performance)
    }

    /// Rewrite the sub-scores of an existing weekly record and shift the
    /// user's total by the difference against the row's previous total,
    /// so re-applying scores never double-counts. The previous total is
    /// read inside the same transaction; a delta computed from an earlier
    /// read would go stale under concurrent edits.
    pub async fn set_weekly(
        &self,
        performance_id: i64,
        user_id: i64,
        scores: &WeeklyScores,
        total: i64,
    ) -> Result<WeeklyPerformance> {
        let mut tx = self.pool.begin().await?;

        let previous =
            sqlx::query_scalar::<_, i64>("SELECT points FROM weekly_performances WHERE id = ?")
                .bind(performance_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(StorageError::NotFound)?;

        let performance = sqlx::query_as::<_, WeeklyPerformance>(
            r#"
            UPDATE weekly_performances
            SET academic_performance = ?,
                mentoring = ?,
                teamwork = ?,
                discipline = ?,
                points = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(scores.academic_performance)
        .bind(scores.mentoring)
        .bind(scores.teamwork)
        .bind(scores.discipline)
        .bind(total)
        .bind(performance_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE users SET points = points + ? WHERE id = ?")
            .bind(total - previous)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(performance)
    }

    pub async fn list_weekly_for_user(&self, user_id: i64) -> Result<Vec<WeeklyPerformance>> {
        let performances = sqlx::query_as::<_, WeeklyPerformance>(
            "SELECT * FROM weekly_performances WHERE user_id = ? ORDER BY week_start DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(performances)
    }

    /// Insert the yearly evaluation and credit its total; one per
    /// (user, year).
    #[allow(clippy::too_many_arguments)]
    pub async fn award_yearly(
        &self,
        user_id: i64,
        year: i64,
        projects_score: i64,
        tech_dictation_score: i64,
        initial_monitoring_score: i64,
        intermediate_certification_score: i64,
        final_certification_score: i64,
        total: i64,
    ) -> Result<YearlyPerformance> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query("UPDATE users SET points = points + ? WHERE id = ?")
            .bind(total)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        let result = sqlx::query_as::<_, YearlyPerformance>(
            r#"
            INSERT INTO yearly_performances
                (user_id, year, points, projects_score, tech_dictation_score,
                 initial_monitoring_score, intermediate_certification_score, final_certification_score)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(year)
        .bind(total)
        .bind(projects_score)
        .bind(tech_dictation_score)
        .bind(initial_monitoring_score)
        .bind(intermediate_certification_score)
        .bind(final_certification_score)
        .fetch_one(&mut *tx)
        .await
        .map_err(StorageError::from);

        let performance = match result {
            Err(e) if e.is_unique_violation() => {
                return Err(StorageError::ConstraintViolation(
                    "yearly performance already recorded for this year".to_string(),
                ));
            }
            other => other?,
        };

        tx.commit().await?;

        Ok(performance)
    }

    pub async fn list_yearly_for_user(&self, user_id: i64) -> Result<Vec<YearlyPerformance>> {
        let performances = sqlx::query_as::<_, YearlyPerformance>(
            "SELECT * FROM yearly_performances WHERE user_id = ? ORDER BY year DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(performances)
    }
}
