use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::performance::WeeklyScores;
use crate::dto::user::UserResponse;
use crate::models::Group;

/// Award event dispatched by type, mirroring the three accrual rules.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(tag = "award_type", rename_all = "lowercase")]
pub enum AwardRequest {
    Competition(CompetitionAward),
    Weekly(WeeklyAward),
    Yearly(YearlyAward),
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CompetitionAward {
    pub user_id: i64,

    #[validate(length(min = 1, max = 200, message = "Competition name is required"))]
    pub name: String,

    #[validate(range(min = 0, max = 100))]
    pub level: i64,

    #[validate(range(min = 0, max = 100))]
    pub quality: i64,

    #[validate(range(min = 0, max = 100))]
    pub place: i64,

    #[validate(range(min = 0, max = 100))]
    pub communication: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct WeeklyAward {
    pub user_id: i64,

    pub week_start: chrono::NaiveDate,

    #[serde(flatten)]
    #[validate(nested)]
    pub scores: WeeklyScores,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct YearlyAward {
    pub user_id: i64,

    #[validate(range(min = 2000, max = 2100))]
    pub year: i64,

    #[validate(range(min = 0, max = 100))]
    pub projects_score: i64,

    #[validate(range(min = 0, max = 100))]
    pub tech_dictation_score: i64,

    #[validate(range(min = 0, max = 100))]
    pub initial_monitoring_score: i64,

    #[validate(range(min = 0, max = 100))]
    pub intermediate_certification_score: i64,

    #[validate(range(min = 0, max = 100))]
    pub final_certification_score: i64,
}

/// Result of a single award action
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AwardOutcome {
    pub user_id: i64,
    pub points_awarded: i64,
    pub new_points: i64,
}

/// Bulk competition reward for a set of selected students
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BulkRewardRequest {
    #[validate(length(min = 1, message = "At least one student must be selected"))]
    pub selected_students: Vec<i64>,

    #[validate(length(min = 1, max = 200, message = "Competition name is required"))]
    pub competition_name: String,

    #[validate(range(min = 0, max = 100))]
    pub level: i64,

    #[validate(range(min = 0, max = 100))]
    pub quality: i64,

    #[validate(range(min = 0, max = 100))]
    pub place: i64,

    #[validate(length(max = 200))]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BulkRewardOutcome {
    pub points_each: i64,
    pub students_rewarded: usize,
}

/// Groups and students offered on the bulk reward form
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RewardContextResponse {
    pub groups: Vec<Group>,
    pub students: Vec<UserResponse>,
}
