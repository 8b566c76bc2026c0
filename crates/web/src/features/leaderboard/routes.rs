use axum::{Router, routing::get};
use storage::Database;

use super::handlers::top_users;

pub fn routes() -> Router<Database> {
    Router::new().route("/top_users", get(top_users))
}
