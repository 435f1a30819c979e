//! Training derivation rules: total time, exercise ordering, share ids and
//! ownership.
//!
//! A training's `total_time` is never accepted from the client; it is the sum
//! of the per-training `custom_time` of its exercises and is recomputed on
//! every write.

use std::collections::HashSet;

use rand::Rng;

use crate::error::CoreError;
use crate::types::{DbId, Minutes};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length for a training name (characters).
pub const MAX_NAME_LENGTH: usize = 200;

/// Length of a generated share id.
pub const SHARE_ID_LENGTH: usize = 16;

/// How many fresh share ids are tried before giving up on a collision.
pub const MAX_SHARE_ID_ATTEMPTS: usize = 5;

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

/// Trim and validate a training name.
pub fn normalize_name(raw: &str) -> Result<String, CoreError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Training name is required".into()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Training name exceeds maximum length of {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(name.to_string())
}

/// Resolve the stored custom time of one entry. Missing means zero.
pub fn resolve_custom_time(requested: Option<Minutes>) -> Result<Minutes, CoreError> {
    match requested {
        None => Ok(0),
        Some(minutes) if minutes < 0 => Err(CoreError::Validation(format!(
            "Custom time must not be negative (got {minutes})"
        ))),
        Some(minutes) => Ok(minutes),
    }
}

/// Resolve the display positions of a training's entries.
///
/// Explicit orders are kept as given. A missing order takes the entry's
/// 1-based request position, moved up past any order already in use.
pub fn resolve_orders(requested: &[Option<i32>]) -> Vec<i32> {
    let mut taken: HashSet<i32> = requested.iter().flatten().copied().collect();
    requested
        .iter()
        .enumerate()
        .map(|(index, order)| match order {
            Some(order) => *order,
            None => {
                let mut candidate = i32::try_from(index + 1).unwrap_or(i32::MAX);
                while taken.contains(&candidate) && candidate < i32::MAX {
                    candidate += 1;
                }
                taken.insert(candidate);
                candidate
            }
        })
        .collect()
}

/// Sum the custom times of a training's exercises.
pub fn total_time<I>(custom_times: I) -> Result<Minutes, CoreError>
where
    I: IntoIterator<Item = Minutes>,
{
    let sum: i64 = custom_times.into_iter().map(i64::from).sum();
    Minutes::try_from(sum)
        .map_err(|_| CoreError::Validation(format!("Total time of {sum} minutes is too large")))
}

// ---------------------------------------------------------------------------
// Share ids
// ---------------------------------------------------------------------------

/// Generate a random share id of [`SHARE_ID_LENGTH`] alphanumeric characters.
pub fn generate_share_id() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(SHARE_ID_LENGTH)
        .map(char::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

/// Only the creator of a training may read it privately, edit or delete it.
pub fn ensure_owner(training_id: DbId, created_by: DbId, caller: DbId) -> Result<(), CoreError> {
    if created_by != caller {
        return Err(CoreError::Forbidden(format!(
            "You do not have permission to modify training {training_id}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_sum_of_custom_times() {
        assert_eq!(total_time([12, 10, 8]).unwrap(), 30);
    }

    #[test]
    fn empty_training_has_zero_total() {
        assert_eq!(total_time(std::iter::empty()).unwrap(), 0);
    }

    #[test]
    fn overflowing_total_is_rejected() {
        assert!(total_time([Minutes::MAX, 1]).is_err());
    }

    #[test]
    fn missing_custom_time_counts_as_zero() {
        assert_eq!(resolve_custom_time(None).unwrap(), 0);
        assert_eq!(resolve_custom_time(Some(15)).unwrap(), 15);
    }

    #[test]
    fn negative_custom_time_is_rejected() {
        assert!(resolve_custom_time(Some(-1)).is_err());
    }

    #[test]
    fn missing_order_falls_back_to_position() {
        assert_eq!(resolve_orders(&[None, None]), vec![1, 2]);
        assert_eq!(resolve_orders(&[Some(3), None]), vec![3, 2]);
    }

    #[test]
    fn missing_order_skips_explicit_ones() {
        assert_eq!(resolve_orders(&[Some(2), None]), vec![2, 3]);
        assert_eq!(resolve_orders(&[None, Some(1), None]), vec![2, 1, 3]);
    }

    #[test]
    fn explicit_duplicates_are_kept() {
        assert_eq!(resolve_orders(&[Some(1), Some(1)]), vec![1, 1]);
    }

    #[test]
    fn share_id_has_expected_shape() {
        let id = generate_share_id();
        assert_eq!(id.len(), SHARE_ID_LENGTH);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn share_ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_share_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn blank_training_name_is_rejected() {
        assert!(normalize_name("").is_err());
        assert_eq!(normalize_name(" T1 ").unwrap(), "T1");
    }

    #[test]
    fn only_creator_passes_ownership_check() {
        assert!(ensure_owner(7, 2, 2).is_ok());
        let err = ensure_owner(7, 2, 3).unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));
    }
}
