//! First-start admin account.

use sanse_core::roles::ROLE_ADMIN;
use sanse_core::user::{normalize_email, normalize_full_name, validate_password_strength};
use sanse_db::models::user::NewUser;
use sanse_db::Store;

use crate::auth::password::hash_password;
use crate::config::AdminBootstrap;
use crate::error::{AppError, AppResult};

/// Create the configured admin unless a user with that email exists.
///
/// Returns `true` if an account was created.
pub async fn ensure_admin(store: &Store, admin: &AdminBootstrap) -> AppResult<bool> {
    let email = normalize_email(&admin.email);
    if store.users.find_by_email(&email).await?.is_some() {
        tracing::debug!(email = %email, "Bootstrap admin already exists");
        return Ok(false);
    }

    validate_password_strength(&admin.password)?;
    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = store
        .users
        .create(&NewUser {
            email,
            password_hash,
            role: ROLE_ADMIN.to_string(),
            full_name: normalize_full_name(&admin.full_name)?,
        })
        .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Bootstrap admin created");
    Ok(true)
}
