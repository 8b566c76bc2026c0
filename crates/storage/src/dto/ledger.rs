use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::dto::user::UserResponse;
use crate::models::Transaction;

/// Manual reward or penalty for a single user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AdjustPointsRequest {
    pub user_id: i64,

    #[validate(range(min = 0, message = "Points must be non-negative"))]
    pub points: i64,

    #[validate(length(max = 200))]
    pub reason: Option<String>,

    /// "award" or "penalty"; anything else is rejected with 400.
    pub transaction_type: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdjustOutcome {
    pub transaction: Transaction,
    pub new_points: i64,
}

/// Ledger pages default to 20 entries, newest first.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct LedgerPageParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl LedgerPageParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err("page must be >= 1".to_string());
        }
        if self.per_page < 1 || self.per_page > 100 {
            return Err("per_page must be between 1 and 100".to_string());
        }
        Ok(())
    }

    pub fn offset(&self) -> u32 {
        (self.page - 1) * self.per_page
    }

    pub fn limit(&self) -> u32 {
        self.per_page
    }
}

/// A user's own transaction history
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PointsHistoryResponse {
    pub user: UserResponse,
    pub transactions: Vec<Transaction>,
}
