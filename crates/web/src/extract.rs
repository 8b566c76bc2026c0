use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use storage::{Database, error::StorageError, models::User, repository::session::SessionRepository};

use crate::error::WebError;

pub const SESSION_COOKIE: &str = "session_token";

/// Authenticated caller, resolved from the session cookie.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    Database: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_owned())
            .ok_or(WebError::Unauthorized)?;

        let db = Database::from_ref(state);
        let user = match SessionRepository::new(db.pool()).find_user(&token).await {
            Ok(user) => user,
            Err(StorageError::NotFound) => return Err(WebError::Unauthorized),
            Err(e) => return Err(WebError::Storage(e)),
        };

        Ok(CurrentUser(user))
    }
}

/// Teacher-or-admin gate for award and performance management endpoints.
#[derive(Debug, Clone)]
pub struct Staff(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for Staff
where
    Database: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.role.is_staff() {
            tracing::warn!(user_id = user.id, "non-staff access to gated endpoint");
            return Err(WebError::forbidden());
        }

        Ok(Staff(user))
    }
}

/// Admin-only gate for user management endpoints.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    Database: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.role.is_admin() {
            tracing::warn!(user_id = user.id, "non-admin access to gated endpoint");
            return Err(WebError::forbidden());
        }

        Ok(AdminUser(user))
    }
}
