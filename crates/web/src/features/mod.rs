use axum::Router;
use storage::Database;

pub mod auth;
pub mod awards;
pub mod leaderboard;
pub mod ledger;
pub mod performance;
pub mod users;

pub fn router() -> Router<Database> {
    Router::new()
        .merge(auth::routes::routes())
        .merge(awards::routes::routes())
        .merge(leaderboard::routes::routes())
        .merge(ledger::routes::routes())
        .merge(performance::routes::routes())
        .merge(users::routes::routes())
}
