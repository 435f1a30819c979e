//! Handlers for the `/categories` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sanse_core::category::{self, DEFAULT_COLOR};
use sanse_core::error::CoreError;
use sanse_core::types::DbId;
use sanse_db::models::category::{Category, CategoryFields};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::middleware::rbac::RequirePlanner;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for creating or updating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, message = "Category name is required"))]
    pub name: String,
    /// Display color tag. Omitted means the default on create and the
    /// current color on update.
    pub color: Option<String>,
}

async fn find_or_404(state: &AppState, id: DbId) -> AppResult<Category> {
    state
        .store
        .categories
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))
}

/// Reject `name` if another category already uses it, ignoring case.
async fn ensure_name_free(state: &AppState, name: &str, except: Option<DbId>) -> AppResult<()> {
    if let Some(existing) = state.store.categories.find_by_name(name).await? {
        if Some(existing.id) != except {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "A category named '{}' already exists",
                existing.name
            ))));
        }
    }
    Ok(())
}

/// GET /api/categories
pub async fn list_categories(
    RequirePlanner(_user): RequirePlanner,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = state.store.categories.list().await?;
    Ok(Json(ApiResponse::ok(categories)))
}

/// GET /api/categories/{id}
pub async fn get_category(
    RequirePlanner(_user): RequirePlanner,
    State(state): State<AppState>,
    ValidatedPath(category_id): ValidatedPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = find_or_404(&state, category_id).await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// POST /api/categories
pub async fn create_category(
    RequirePlanner(user): RequirePlanner,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CategoryRequest>,
) -> AppResult<impl IntoResponse> {
    let name = category::normalize_name(&input.name)?;
    ensure_name_free(&state, &name, None).await?;

    let fields = CategoryFields {
        color: category::resolve_color(input.color.as_deref(), DEFAULT_COLOR),
        name,
    };
    let created = state.store.categories.create(&fields, user.user_id).await?;

    tracing::info!(
        category_id = created.id,
        name = %created.name,
        user_id = user.user_id,
        "Category created",
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    RequirePlanner(user): RequirePlanner,
    State(state): State<AppState>,
    ValidatedPath(category_id): ValidatedPath<DbId>,
    ValidatedJson(input): ValidatedJson<CategoryRequest>,
) -> AppResult<impl IntoResponse> {
    let existing = find_or_404(&state, category_id).await?;
    let name = category::normalize_name(&input.name)?;
    ensure_name_free(&state, &name, Some(category_id)).await?;

    let fields = CategoryFields {
        color: category::resolve_color(input.color.as_deref(), &existing.color),
        name,
    };
    let updated = state
        .store
        .categories
        .update(category_id, &fields)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }))?;

    tracing::info!(category_id, user_id = user.user_id, "Category updated");

    Ok(Json(ApiResponse::ok(updated)))
}

/// DELETE /api/categories/{id}
///
/// Refused with 400 while any exercise still belongs to the category.
pub async fn delete_category(
    RequirePlanner(user): RequirePlanner,
    State(state): State<AppState>,
    ValidatedPath(category_id): ValidatedPath<DbId>,
) -> AppResult<impl IntoResponse> {
    find_or_404(&state, category_id).await?;

    let in_use = state.store.exercises.count_by_category(category_id).await?;
    category::ensure_deletable(in_use)?;

    state.store.categories.delete(category_id).await?;

    tracing::info!(category_id, user_id = user.user_id, "Category deleted");

    Ok(Json(ApiResponse::message("Category deleted successfully")))
}
