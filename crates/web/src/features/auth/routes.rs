use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{login, logout, register};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout).post(logout))
}
