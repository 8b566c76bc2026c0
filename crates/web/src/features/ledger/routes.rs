use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{points, transactions};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/points", get(points))
        .route("/transactions", get(transactions))
}
