//! User account rules.

use crate::error::CoreError;

/// Minimum password length enforced on user creation and password change.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Emails are stored and compared lowercased.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Trim and validate a display name.
pub fn normalize_full_name(raw: &str) -> Result<String, CoreError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Full name is required".into()));
    }
    Ok(name.to_string())
}

/// Validate that a password meets the minimum length.
pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}
