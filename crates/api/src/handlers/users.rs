//! Admin-only user management.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sanse_core::error::CoreError;
use sanse_core::roles::{validate_role, ROLE_TRAINER};
use sanse_core::types::DbId;
use sanse_core::user::{normalize_email, normalize_full_name, validate_password_strength};
use sanse_db::models::user::{NewUser, UserChanges};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    pub password: String,
    pub full_name: String,
    /// Defaults to `trainer`.
    pub role: Option<String>,
}

/// Request body for `PUT /users/{id}`. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

fn hash(password: &str) -> AppResult<String> {
    validate_password_strength(password)?;
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

/// GET /api/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = state.store.users.list().await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// POST /api/users
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    let role = input.role.unwrap_or_else(|| ROLE_TRAINER.to_string());
    validate_role(&role)?;
    let email = normalize_email(&input.email);
    let full_name = normalize_full_name(&input.full_name)?;

    if state.store.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A user with email '{email}' already exists"
        ))));
    }

    let new_user = NewUser {
        email,
        password_hash: hash(&input.password)?,
        role,
        full_name,
    };
    let user = state.store.users.create(&new_user).await?;

    tracing::info!(
        user_id = user.id,
        role = %user.role,
        admin_id = admin.user_id,
        "User created",
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

/// PUT /api/users/{id}
pub async fn update_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidatedPath(user_id): ValidatedPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateUserRequest>,
) -> AppResult<impl IntoResponse> {
    let mut changes = UserChanges::default();

    if let Some(email) = input.email.as_deref().map(normalize_email) {
        if let Some(other) = state.store.users.find_by_email(&email).await? {
            if other.id != user_id {
                return Err(AppError::Core(CoreError::Conflict(format!(
                    "A user with email '{email}' already exists"
                ))));
            }
        }
        changes.email = Some(email);
    }
    if let Some(role) = input.role {
        validate_role(&role)?;
        changes.role = Some(role);
    }
    if let Some(full_name) = input.full_name {
        changes.full_name = Some(normalize_full_name(&full_name)?);
    }
    if let Some(password) = input.password {
        changes.password_hash = Some(hash(&password)?);
    }
    changes.is_active = input.is_active;

    let user = state
        .store
        .users
        .update(user_id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    tracing::info!(user_id, admin_id = admin.user_id, "User updated");

    Ok(Json(ApiResponse::ok(user)))
}
