use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Competition, Project, Role, User, WeeklyPerformance, YearlyPerformance};

/// Public user representation, never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub points: i64,
    pub group_id: Option<i64>,
    pub is_confirmed: bool,
    pub created_at: NaiveDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            points: user.points,
            group_id: user.group_id,
            is_confirmed: user.is_confirmed,
            created_at: user.created_at,
        }
    }
}

/// Everything ever awarded to one user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserAwardsResponse {
    pub user: UserResponse,
    pub competitions: Vec<Competition>,
    pub weekly_performances: Vec<WeeklyPerformance>,
    pub yearly_performances: Vec<YearlyPerformance>,
    pub projects: Vec<Project>,
}

/// Request payload for confirming a pending account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConfirmUserRequest {
    pub user_id: i64,
}
