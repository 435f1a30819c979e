//! Handlers for the `/exercises` resource.
//!
//! Exercises are always returned with their category resolved.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sanse_core::error::CoreError;
use sanse_core::exercise;
use sanse_core::types::{DbId, Minutes};
use sanse_db::aggregate;
use sanse_db::models::exercise::{Exercise, ExerciseFields, ExerciseWithCategory};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::middleware::rbac::RequirePlanner;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for creating or replacing an exercise.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRequest {
    #[validate(length(min = 1, message = "Exercise name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 1, message = "Estimated time must be greater than 0"))]
    pub estimated_time: Minutes,
    pub category_id: DbId,
}

impl ExerciseRequest {
    /// Validate the request against the current categories.
    async fn into_fields(self, state: &AppState) -> AppResult<ExerciseFields> {
        let name = exercise::normalize_name(&self.name)?;
        exercise::validate_estimated_time(self.estimated_time)?;

        if state
            .store
            .categories
            .find_by_id(self.category_id)
            .await?
            .is_none()
        {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Category {} does not exist",
                self.category_id
            ))));
        }

        Ok(ExerciseFields {
            name,
            description: self.description.trim().to_string(),
            estimated_time: self.estimated_time,
            category_id: self.category_id,
        })
    }
}

async fn find_or_404(state: &AppState, id: DbId) -> AppResult<Exercise> {
    state
        .store
        .exercises
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Exercise",
            id,
        }))
}

async fn with_category(state: &AppState, exercise: Exercise) -> AppResult<ExerciseWithCategory> {
    let mut resolved = aggregate::attach_categories(&state.store, vec![exercise]).await?;
    resolved
        .pop()
        .ok_or_else(|| AppError::InternalError("Exercise lost while resolving category".into()))
}

/// GET /api/exercises
pub async fn list_exercises(
    RequirePlanner(_user): RequirePlanner,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let exercises = state.store.exercises.list().await?;
    let exercises = aggregate::attach_categories(&state.store, exercises).await?;
    Ok(Json(ApiResponse::ok(exercises)))
}

/// GET /api/exercises/{id}
pub async fn get_exercise(
    RequirePlanner(_user): RequirePlanner,
    State(state): State<AppState>,
    ValidatedPath(exercise_id): ValidatedPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let exercise = find_or_404(&state, exercise_id).await?;
    Ok(Json(ApiResponse::ok(with_category(&state, exercise).await?)))
}

/// POST /api/exercises
pub async fn create_exercise(
    RequirePlanner(user): RequirePlanner,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ExerciseRequest>,
) -> AppResult<impl IntoResponse> {
    let fields = input.into_fields(&state).await?;
    let created = state.store.exercises.create(&fields, user.user_id).await?;

    tracing::info!(
        exercise_id = created.id,
        category_id = created.category_id,
        user_id = user.user_id,
        "Exercise created",
    );

    let created = with_category(&state, created).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

/// PUT /api/exercises/{id}
pub async fn update_exercise(
    RequirePlanner(user): RequirePlanner,
    State(state): State<AppState>,
    ValidatedPath(exercise_id): ValidatedPath<DbId>,
    ValidatedJson(input): ValidatedJson<ExerciseRequest>,
) -> AppResult<impl IntoResponse> {
    find_or_404(&state, exercise_id).await?;
    let fields = input.into_fields(&state).await?;

    let updated = state
        .store
        .exercises
        .update(exercise_id, &fields)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Exercise",
            id: exercise_id,
        }))?;

    tracing::info!(exercise_id, user_id = user.user_id, "Exercise updated");

    Ok(Json(ApiResponse::ok(with_category(&state, updated).await?)))
}

/// DELETE /api/exercises/{id}
///
/// Trainings that reference the exercise keep their slots.
pub async fn delete_exercise(
    RequirePlanner(user): RequirePlanner,
    State(state): State<AppState>,
    ValidatedPath(exercise_id): ValidatedPath<DbId>,
) -> AppResult<impl IntoResponse> {
    find_or_404(&state, exercise_id).await?;
    state.store.exercises.delete(exercise_id).await?;

    tracing::info!(exercise_id, user_id = user.user_id, "Exercise deleted");

    Ok(Json(ApiResponse::message("Exercise deleted successfully")))
}
