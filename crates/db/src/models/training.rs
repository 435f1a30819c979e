//! Training aggregate models and DTOs.
//!
//! A [`Training`] owns its ordered [`TrainingExercise`] children; they are
//! stored in `training_exercises` and are not addressable on their own.
//! [`TrainingDetails`] is the read-side view with exercises and categories
//! resolved.

use sanse_core::error::CoreError;
use sanse_core::training;
use sanse_core::types::{DbId, Minutes, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::category::Category;
use crate::models::exercise::ExerciseWithCategory;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// One exercise slot inside a training.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingExercise {
    pub exercise_id: DbId,
    pub custom_time: Minutes,
    #[sqlx(rename = "exercise_order")]
    pub order: i32,
}

/// A row from the `trainings` table plus its child exercise slots.
///
/// `exercises` is filled by the repository in insertion order; sorting by
/// `order` happens at aggregation time.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    pub id: DbId,
    pub name: String,
    pub categories: Vec<DbId>,
    #[sqlx(skip)]
    pub exercises: Vec<TrainingExercise>,
    pub total_time: Minutes,
    pub observations: String,
    pub created_by: DbId,
    pub share_id: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Read-side views
// ---------------------------------------------------------------------------

/// An exercise slot with the referenced exercise resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingExerciseDetails {
    pub exercise_id: DbId,
    pub custom_time: Minutes,
    pub order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise: Option<ExerciseWithCategory>,
}

/// A training with exercises (sorted by `order`) and category tags resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingDetails {
    pub id: DbId,
    pub name: String,
    pub categories: Vec<Category>,
    pub exercises: Vec<TrainingExerciseDetails>,
    pub total_time: Minutes,
    pub observations: String,
    pub created_by: DbId,
    /// Creator's full name; only filled on the public share view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_name: Option<String>,
    pub share_id: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Validated field values for inserting or replacing a training.
///
/// Built through [`TrainingFields::new`], which derives `total_time` from the
/// children so the stored total always matches them.
#[derive(Debug, Clone)]
pub struct TrainingFields {
    pub name: String,
    pub categories: Vec<DbId>,
    pub exercises: Vec<TrainingExercise>,
    pub observations: String,
    total_time: Minutes,
}

impl TrainingFields {
    pub fn new(
        name: String,
        categories: Vec<DbId>,
        exercises: Vec<TrainingExercise>,
        observations: String,
    ) -> Result<Self, CoreError> {
        let total_time = training::total_time(exercises.iter().map(|te| te.custom_time))?;
        Ok(Self {
            name,
            categories,
            exercises,
            observations,
            total_time,
        })
    }

    /// Sum of the children's `custom_time`.
    pub fn total_time(&self) -> Minutes {
        self.total_time
    }
}
