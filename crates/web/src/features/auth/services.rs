use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;
use storage::{
    dto::auth::{LoginRequest, RegisterRequest},
    error::StorageError,
    models::{Role, Session, User},
    repository::{
        session::SessionRepository,
        user::{NewUser, UserRepository},
    },
};

use crate::error::{WebError, WebResult};

pub fn hash_password(password: &str) -> WebResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| WebError::InternalServerError(format!("password hashing failed: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .and_then(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed))
        .is_ok()
}

/// Create an account. Students are active immediately; teachers stay
/// unconfirmed until an admin approves them.
pub async fn register(pool: &SqlitePool, request: &RegisterRequest) -> WebResult<User> {
    if request.role == Role::Admin {
        return Err(WebError::BadRequest(
            "admin accounts cannot be self-registered".to_string(),
        ));
    }

    let password_hash = hash_password(&request.password)?;
    let is_confirmed = request.role == Role::Student;
    let group_id = if request.role == Role::Student {
        request.group_id
    } else {
        None
    };

    let user = UserRepository::new(pool)
        .create(&NewUser {
            username: &request.username,
            full_name: &request.full_name,
            email: &request.email,
            password_hash: &password_hash,
            role: request.role,
            group_id,
            is_confirmed,
        })
        .await?;

    Ok(user)
}

/// Verify credentials and open a session.
pub async fn login(pool: &SqlitePool, request: &LoginRequest) -> WebResult<(User, Session)> {
    let user = match UserRepository::new(pool)
        .find_by_username(&request.username)
        .await
    {
        Ok(user) => user,
        Err(StorageError::NotFound) => return Err(invalid_credentials()),
        Err(e) => return Err(e.into()),
    };

    if !verify_password(&request.password, &user.password_hash) {
        return Err(invalid_credentials());
    }

    if !user.is_confirmed {
        return Err(WebError::BadRequest(
            "account awaiting confirmation".to_string(),
        ));
    }

    let session = SessionRepository::new(pool).create(user.id).await?;

    Ok((user, session))
}

pub async fn logout(pool: &SqlitePool, token: &str) -> WebResult<()> {
    SessionRepository::new(pool).delete(token).await?;
    Ok(())
}

fn invalid_credentials() -> WebError {
    WebError::BadRequest("invalid username or password".to_string())
}
