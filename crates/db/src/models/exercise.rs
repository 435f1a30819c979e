//! Exercise entity model and DTOs.

use sanse_core::types::{DbId, Minutes, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::category::Category;

/// A row from the `exercises` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub estimated_time: Minutes,
    pub category_id: DbId,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An exercise with its category resolved.
///
/// `category` is omitted from JSON when the referenced category no longer
/// exists.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseWithCategory {
    #[serde(flatten)]
    pub exercise: Exercise,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

/// Validated field values for inserting or replacing an exercise.
#[derive(Debug, Clone)]
pub struct ExerciseFields {
    pub name: String,
    pub description: String,
    pub estimated_time: Minutes,
    pub category_id: DbId,
}
