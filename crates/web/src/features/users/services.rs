use sqlx::SqlitePool;
use storage::{
    dto::user::{UserAwardsResponse, UserResponse},
    models::Role,
    repository::{
        competition::CompetitionRepository, performance::PerformanceRepository,
        project::ProjectRepository, user::UserRepository,
    },
};

use crate::error::{WebError, WebResult};

pub async fn all_users(pool: &SqlitePool) -> WebResult<Vec<UserResponse>> {
    let users = UserRepository::new(pool).list().await?;

    Ok(users.into_iter().map(UserResponse::from).collect())
}

pub async fn manageable_users(pool: &SqlitePool) -> WebResult<Vec<UserResponse>> {
    let users = UserRepository::new(pool).list_non_admin().await?;

    Ok(users.into_iter().map(UserResponse::from).collect())
}

pub async fn pending_users(pool: &SqlitePool) -> WebResult<Vec<UserResponse>> {
    let users = UserRepository::new(pool).list_unconfirmed().await?;

    Ok(users.into_iter().map(UserResponse::from).collect())
}

pub async fn confirm_user(pool: &SqlitePool, user_id: i64) -> WebResult<()> {
    UserRepository::new(pool).confirm(user_id).await?;

    Ok(())
}

/// Admin accounts can never be deleted, not even by another admin.
pub async fn delete_user(pool: &SqlitePool, user_id: i64) -> WebResult<()> {
    let users = UserRepository::new(pool);
    let target = users.find_by_id(user_id).await?;

    if target.role == Role::Admin {
        return Err(WebError::Forbidden {
            redirect: "/manage_users",
            flash: "cannot_delete_admin",
        });
    }

    users.delete(user_id).await?;

    Ok(())
}

pub async fn user_awards(pool: &SqlitePool, user_id: i64) -> WebResult<UserAwardsResponse> {
    let user = UserRepository::new(pool).find_by_id(user_id).await?;

    let competitions = CompetitionRepository::new(pool).list_for_user(user_id).await?;
    let performances = PerformanceRepository::new(pool);
    let weekly_performances = performances.list_weekly_for_user(user_id).await?;
    let yearly_performances = performances.list_yearly_for_user(user_id).await?;
    let projects = ProjectRepository::new(pool).list_for_user(user_id).await?;

    Ok(UserAwardsResponse {
        user: UserResponse::from(user),
        competitions,
        weekly_performances,
        yearly_performances,
        projects,
    })
}
