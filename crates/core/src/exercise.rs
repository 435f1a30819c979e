//! Exercise field validation.

use crate::error::CoreError;
use crate::types::Minutes;

/// Maximum length for an exercise name (characters).
pub const MAX_NAME_LENGTH: usize = 200;

/// Trim and validate an exercise name.
pub fn normalize_name(raw: &str) -> Result<String, CoreError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Exercise name is required".into()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Exercise name exceeds maximum length of {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(name.to_string())
}

/// Estimated time must be a positive number of minutes.
pub fn validate_estimated_time(minutes: Minutes) -> Result<(), CoreError> {
    if minutes <= 0 {
        return Err(CoreError::Validation(format!(
            "Estimated time must be greater than 0 minutes (got {minutes})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_time_is_valid() {
        assert!(validate_estimated_time(1).is_ok());
        assert!(validate_estimated_time(90).is_ok());
    }

    #[test]
    fn zero_or_negative_time_is_invalid() {
        assert!(validate_estimated_time(0).is_err());
        assert!(validate_estimated_time(-5).is_err());
    }

    #[test]
    fn blank_name_is_invalid() {
        assert!(normalize_name(" \t").is_err());
        assert_eq!(normalize_name(" Sentadillas").unwrap(), "Sentadillas");
    }
}
