use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{update_weekly, weekly_adjust, weekly_sheet};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/weekly_performance", get(weekly_sheet).post(weekly_adjust))
        .route("/update_weekly_performance", post(update_weekly))
}
