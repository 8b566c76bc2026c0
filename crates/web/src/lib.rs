use axum::Router;
use storage::Database;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod extract;
pub mod features;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::auth::handlers::register,
        features::auth::handlers::login,
        features::auth::handlers::logout,
        features::awards::handlers::award,
        features::awards::handlers::reward_context,
        features::awards::handlers::reward_punish,
        features::awards::handlers::award_points,
        features::leaderboard::handlers::top_users,
        features::ledger::handlers::points,
        features::ledger::handlers::transactions,
        features::performance::handlers::weekly_sheet,
        features::performance::handlers::weekly_adjust,
        features::performance::handlers::update_weekly,
        features::users::handlers::list_users,
        features::users::handlers::manage_users,
        features::users::handlers::pending_users,
        features::users::handlers::confirm_user,
        features::users::handlers::delete_user,
        features::users::handlers::user_awards,
    ),
    components(
        schemas(
            storage::dto::auth::RegisterRequest,
            storage::dto::auth::LoginRequest,
            storage::dto::user::UserResponse,
            storage::dto::user::UserAwardsResponse,
            storage::dto::user::ConfirmUserRequest,
            storage::dto::award::AwardRequest,
            storage::dto::award::CompetitionAward,
            storage::dto::award::WeeklyAward,
            storage::dto::award::YearlyAward,
            storage::dto::award::AwardOutcome,
            storage::dto::award::BulkRewardRequest,
            storage::dto::award::BulkRewardOutcome,
            storage::dto::award::RewardContextResponse,
            storage::dto::performance::WeeklyScores,
            storage::dto::performance::WeeklyScoresUpdate,
            storage::dto::performance::WeeklySheetEntry,
            storage::dto::performance::WeeklySheetResponse,
            storage::dto::performance::WeeklyAdjustRequest,
            storage::dto::performance::PerformanceUpdateOutcome,
            storage::dto::ledger::AdjustPointsRequest,
            storage::dto::ledger::AdjustOutcome,
            storage::dto::ledger::PointsHistoryResponse,
            storage::dto::ranking::LeaderboardEntry,
            storage::dto::ranking::LeaderboardResponse,
            storage::dto::common::PaginationParams,
            storage::dto::common::PaginationMeta,
            storage::models::User,
            storage::models::Role,
            storage::models::Group,
            storage::models::Transaction,
            storage::models::TransactionType,
            storage::models::Competition,
            storage::models::WeeklyPerformance,
            storage::models::YearlyPerformance,
            storage::models::Project,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login and sessions"),
        (name = "awards", description = "Staff award and adjustment endpoints"),
        (name = "leaderboard", description = "Public leaderboard"),
        (name = "ledger", description = "Points transaction history"),
        (name = "performance", description = "Weekly performance sheet"),
        (name = "users", description = "Admin user management"),
    )
)]
pub struct ApiDoc;

/// Assemble the full application router over one database handle.
pub fn app(db: Database) -> Router {
    let api = features::router().with_state(db);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api)
        .layer(CorsLayer::permissive())
}
