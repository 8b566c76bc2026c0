use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{
    confirm_user, delete_user, list_users, manage_users, pending_users, user_awards,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/users", get(list_users))
        .route("/manage_users", get(manage_users))
        .route("/confirm_users", get(pending_users).post(confirm_user))
        .route("/delete_user/:id", post(delete_user))
        .route("/user/:id/awards", get(user_awards))
}
