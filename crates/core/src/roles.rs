//! Well-known role name constants.
//!
//! These must match the `chk_users_role` constraint in the initial migration.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TRAINER: &str = "trainer";

/// All assignable roles.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_TRAINER];

/// Whether `role` may manage categories, exercises and trainings.
pub fn can_plan(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_TRAINER
}

/// Validate that a role string is one of the known roles.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {VALID_ROLES:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_are_valid() {
        for role in VALID_ROLES {
            assert!(validate_role(role).is_ok());
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(validate_role("preparador").is_err());
        assert!(validate_role("").is_err());
    }

    #[test]
    fn both_roles_can_plan() {
        assert!(can_plan(ROLE_ADMIN));
        assert!(can_plan(ROLE_TRAINER));
        assert!(!can_plan("guest"));
    }
}
