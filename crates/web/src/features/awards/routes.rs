use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{award, award_points, reward_context, reward_punish};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/award", post(award))
        .route("/reward_punish", get(reward_context).post(reward_punish))
        .route("/award_points", post(award_points))
}
