//! Category naming rules and the delete guard.
//!
//! Category names are unique case-insensitively among the categories that
//! currently exist; a deleted name is immediately reusable.

use crate::error::CoreError;

/// Display tag applied when a category is created without a color.
pub const DEFAULT_COLOR: &str = "bg-gray-100 text-gray-800";

/// Maximum length for a category name (characters).
pub const MAX_NAME_LENGTH: usize = 100;

/// Trim and validate a category name, returning the stored form.
pub fn normalize_name(raw: &str) -> Result<String, CoreError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Category name is required".into()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Category name exceeds maximum length of {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(name.to_string())
}

/// Comparison key used for the case-insensitive uniqueness check.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Whether two category names collide.
pub fn names_collide(a: &str, b: &str) -> bool {
    name_key(a) == name_key(b)
}

/// Pick the color to store: the requested one, or `fallback` when absent or blank.
pub fn resolve_color(requested: Option<&str>, fallback: &str) -> String {
    match requested.map(str::trim) {
        Some(color) if !color.is_empty() => color.to_string(),
        _ => fallback.to_string(),
    }
}

/// Reject deleting a category that exercises still point at.
pub fn ensure_deletable(exercise_count: i64) -> Result<(), CoreError> {
    if exercise_count > 0 {
        return Err(CoreError::Validation(format!(
            "Cannot delete category: {exercise_count} exercise(s) still use it"
        )));
    }
    Ok(())
}
