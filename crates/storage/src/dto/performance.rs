use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::dto::user::UserResponse;
use crate::models::WeeklyPerformance;

/// The four weekly sub-scores
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate, ToSchema)]
pub struct WeeklyScores {
    #[validate(range(min = 0, max = 100))]
    pub academic_performance: i64,

    #[validate(range(min = 0, max = 100))]
    pub mentoring: i64,

    #[validate(range(min = 0, max = 100))]
    pub teamwork: i64,

    #[validate(range(min = 0, max = 100))]
    pub discipline: i64,
}

/// Request payload for rewriting a student's weekly sub-scores
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct WeeklyScoresUpdate {
    pub student_id: i64,

    pub week_start: NaiveDate,

    #[serde(flatten)]
    #[validate(nested)]
    pub scores: WeeklyScores,
}

#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct WeeklySheetQuery {
    /// Any date inside the requested week; defaults to today.
    pub date: Option<NaiveDate>,
    pub group_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WeeklySheetEntry {
    pub student: UserResponse,
    pub performance: WeeklyPerformance,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WeeklySheetResponse {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub entries: Vec<WeeklySheetEntry>,
}

/// Ad-hoc reward or penalty issued from the weekly sheet
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct WeeklyAdjustRequest {
    pub student_id: i64,

    #[validate(range(min = 0, message = "Points must be non-negative"))]
    pub points: i64,

    #[validate(length(max = 200))]
    pub reason: Option<String>,

    /// "reward" or "penalty"; anything else is rejected with 400.
    pub action: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PerformanceUpdateOutcome {
    pub success: bool,
    pub new_points: i64,
}
