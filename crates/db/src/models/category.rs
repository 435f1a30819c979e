//! Category entity model and DTOs.

use sanse_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated field values for inserting or replacing a category.
#[derive(Debug, Clone)]
pub struct CategoryFields {
    pub name: String,
    pub color: String,
}
