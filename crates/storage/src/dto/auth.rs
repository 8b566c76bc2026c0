use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Role;

/// Request payload for account registration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Username must be between 1 and 100 characters"
    ))]
    pub username: String,

    #[validate(length(
        min = 1,
        max = 300,
        message = "Full name must be between 1 and 300 characters"
    ))]
    pub full_name: String,

    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(length(min = 4, max = 128, message = "Password must be at least 4 characters"))]
    pub password: String,

    pub role: Role,

    /// Group membership, only honored for student registrations.
    pub group_id: Option<i64>,
}

/// Request payload for logging in
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}
