use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One record per (user, week_start). `points` always equals the sum of
/// the four sub-scores.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WeeklyPerformance {
    pub id: i64,
    pub user_id: i64,
    pub week_start: NaiveDate,
    pub week: i64,
    pub year: i64,
    pub points: i64,
    pub academic_performance: i64,
    pub mentoring: i64,
    pub teamwork: i64,
    pub discipline: i64,
}

/// One record per (user, year); the five sub-scores sum to `points`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct YearlyPerformance {
    pub id: i64,
    pub user_id: i64,
    pub year: i64,
    pub points: i64,
    pub projects_score: i64,
    pub tech_dictation_score: i64,
    pub initial_monitoring_score: i64,
    pub intermediate_certification_score: i64,
    pub final_certification_score: i64,
}
