//! Handlers for the `/trainings` resource.
//!
//! Trainings are private to their creator except through the share lookup,
//! which needs no authentication. `totalTime` is always recomputed from the
//! submitted exercises.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sanse_core::error::CoreError;
use sanse_core::training::{self, MAX_SHARE_ID_ATTEMPTS};
use sanse_core::types::{DbId, Minutes};
use sanse_db::{aggregate, Store};
use sanse_db::models::training::{Training, TrainingExercise, TrainingFields};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::middleware::rbac::RequirePlanner;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for creating or replacing a training.
///
/// `name`, `categories` and `exercises` are required; empty lists are fine.
#[derive(Debug, Deserialize, Validate)]
pub struct TrainingRequest {
    #[validate(length(min = 1, message = "Training name is required"))]
    pub name: String,
    pub categories: Vec<DbId>,
    #[validate(nested)]
    pub exercises: Vec<TrainingExerciseRequest>,
    pub observations: Option<String>,
}

/// One exercise entry of a [`TrainingRequest`].
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrainingExerciseRequest {
    pub exercise_id: DbId,
    /// Minutes spent on the exercise in this training. Missing means 0.
    #[validate(range(min = 0, message = "Custom time must not be negative"))]
    pub custom_time: Option<Minutes>,
    /// Display position. Missing means the entry's position in the request.
    pub order: Option<i32>,
}

impl TrainingRequest {
    /// Resolve defaults and derive the total time.
    pub fn into_fields(self) -> Result<TrainingFields, CoreError> {
        let name = training::normalize_name(&self.name)?;
        let requested: Vec<Option<i32>> = self.exercises.iter().map(|e| e.order).collect();
        let orders = training::resolve_orders(&requested);
        let exercises = self
            .exercises
            .into_iter()
            .zip(orders)
            .map(|(entry, order)| {
                Ok(TrainingExercise {
                    exercise_id: entry.exercise_id,
                    custom_time: training::resolve_custom_time(entry.custom_time)?,
                    order,
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        TrainingFields::new(
            name,
            self.categories,
            exercises,
            self.observations.unwrap_or_default(),
        )
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a training and check that `caller` created it.
async fn find_owned(state: &AppState, id: DbId, caller: DbId) -> AppResult<Training> {
    let found = state
        .store
        .trainings
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Training",
            id,
        }))?;
    training::ensure_owner(found.id, found.created_by, caller)?;
    Ok(found)
}

/// Pick a share id no existing training uses.
async fn allocate_share_id(store: &Store) -> AppResult<String> {
    allocate_share_id_with(store, training::generate_share_id).await
}

/// Draw candidates from `generate` until one is free, up to
/// [`MAX_SHARE_ID_ATTEMPTS`] times.
async fn allocate_share_id_with<F>(store: &Store, mut generate: F) -> AppResult<String>
where
    F: FnMut() -> String,
{
    for attempt in 1..=MAX_SHARE_ID_ATTEMPTS {
        let candidate = generate();
        if !store.trainings.share_id_exists(&candidate).await? {
            return Ok(candidate);
        }
        tracing::warn!(attempt, "Share id collision, regenerating");
    }
    Err(AppError::InternalError(format!(
        "No free share id after {MAX_SHARE_ID_ATTEMPTS} attempts"
    )))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/trainings
///
/// The caller's trainings, newest first.
pub async fn list_trainings(
    RequirePlanner(user): RequirePlanner,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let trainings = state.store.trainings.list_by_creator(user.user_id).await?;
    let trainings = aggregate::load_many(&state.store, trainings).await?;
    Ok(Json(ApiResponse::ok(trainings)))
}

/// GET /api/trainings/{id}
pub async fn get_training(
    RequirePlanner(user): RequirePlanner,
    State(state): State<AppState>,
    ValidatedPath(training_id): ValidatedPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = find_owned(&state, training_id, user.user_id).await?;
    let details = aggregate::load_details(&state.store, found).await?;
    Ok(Json(ApiResponse::ok(details)))
}

/// POST /api/trainings
pub async fn create_training(
    RequirePlanner(user): RequirePlanner,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<TrainingRequest>,
) -> AppResult<impl IntoResponse> {
    let fields = input.into_fields()?;
    let share_id = allocate_share_id(&state.store).await?;

    let created = state
        .store
        .trainings
        .create(&fields, user.user_id, &share_id)
        .await?;

    tracing::info!(
        training_id = created.id,
        share_id = %created.share_id,
        total_time = created.total_time,
        exercise_count = created.exercises.len(),
        user_id = user.user_id,
        "Training created",
    );

    let details = aggregate::load_details(&state.store, created).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(details, "Training created successfully")),
    ))
}

/// PUT /api/trainings/{id}
///
/// Replaces every field and the whole exercise list. The share id is kept.
pub async fn update_training(
    RequirePlanner(user): RequirePlanner,
    State(state): State<AppState>,
    ValidatedPath(training_id): ValidatedPath<DbId>,
    ValidatedJson(input): ValidatedJson<TrainingRequest>,
) -> AppResult<impl IntoResponse> {
    find_owned(&state, training_id, user.user_id).await?;
    let fields = input.into_fields()?;

    let updated = state
        .store
        .trainings
        .update(training_id, &fields)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Training",
            id: training_id,
        }))?;

    tracing::info!(
        training_id,
        total_time = updated.total_time,
        exercise_count = updated.exercises.len(),
        user_id = user.user_id,
        "Training updated",
    );

    let details = aggregate::load_details(&state.store, updated).await?;
    Ok(Json(ApiResponse::with_message(
        details,
        "Training updated successfully",
    )))
}

/// DELETE /api/trainings/{id}
pub async fn delete_training(
    RequirePlanner(user): RequirePlanner,
    State(state): State<AppState>,
    ValidatedPath(training_id): ValidatedPath<DbId>,
) -> AppResult<impl IntoResponse> {
    find_owned(&state, training_id, user.user_id).await?;
    state.store.trainings.delete(training_id).await?;

    tracing::info!(training_id, user_id = user.user_id, "Training deleted");

    Ok(Json(ApiResponse::message("Training deleted successfully")))
}

/// GET /api/trainings/shared/{share_id}
///
/// Public read-only view. The share id is matched exactly.
pub async fn get_shared_training(
    State(state): State<AppState>,
    ValidatedPath(share_id): ValidatedPath<String>,
) -> AppResult<impl IntoResponse> {
    let found = state
        .store
        .trainings
        .find_by_share_id(&share_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Training not found".into()))?;

    let creator = state.store.users.find_by_id(found.created_by).await?;
    let mut details = aggregate::load_details(&state.store, found).await?;
    details.created_by_name = creator.map(|u| u.full_name);

    tracing::debug!(training_id = details.id, "Shared training viewed");

    Ok(Json(ApiResponse::ok(details)))
}
