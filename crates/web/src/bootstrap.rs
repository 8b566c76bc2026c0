use anyhow::Context;
use storage::{
    Database,
    error::StorageError,
    models::Role,
    repository::{
        group::GroupRepository,
        user::{NewUser, UserRepository},
    },
};

use crate::features::auth::services::hash_password;

pub const DEFAULT_GROUP: &str = "Default Group";

/// First-boot seeding: the admin account and the default group. Both
/// are idempotent, so running on every start is safe.
pub async fn seed(db: &Database, admin_password: &str) -> anyhow::Result<()> {
    let users = UserRepository::new(db.pool());

    match users.find_by_username("admin").await {
        Ok(_) => {}
        Err(StorageError::NotFound) => {
            let password_hash =
                hash_password(admin_password).map_err(|e| anyhow::anyhow!("{e}"))?;

            users
                .create(&NewUser {
                    username: "admin",
                    full_name: "Administrator",
                    email: "admin@example.com",
                    password_hash: &password_hash,
                    role: Role::Admin,
                    group_id: None,
                    is_confirmed: true,
                })
                .await
                .context("Failed to create admin account")?;

            tracing::info!("Created admin account");
        }
        Err(e) => {
            return Err(anyhow::Error::new(e).context("Failed to look up admin account"));
        }
    }

    let groups = GroupRepository::new(db.pool());
    if groups
        .find_by_name(DEFAULT_GROUP)
        .await
        .context("Failed to look up default group")?
        .is_none()
    {
        groups
            .create(DEFAULT_GROUP)
            .await
            .context("Failed to create default group")?;

        tracing::info!("Created default group");
    }

    Ok(())
}
