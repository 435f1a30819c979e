//! Repository traits and their PostgreSQL implementations.
//!
//! The traits are CRUD-only: validation, ownership and aggregation belong to
//! the callers. Every method is implemented twice, once here against
//! PostgreSQL and once in [`crate::memory`].

use async_trait::async_trait;
use sanse_core::types::DbId;

use crate::error::StoreResult;
use crate::models::category::{Category, CategoryFields};
use crate::models::exercise::{Exercise, ExerciseFields};
use crate::models::training::{Training, TrainingFields};
use crate::models::user::{NewUser, User, UserChanges};

pub mod category_repo;
pub mod exercise_repo;
pub mod training_repo;
pub mod user_repo;

pub use category_repo::PgCategoryRepo;
pub use exercise_repo::PgExerciseRepo;
pub use training_repo::PgTrainingRepo;
pub use user_repo::PgUserRepo;

/// Persistence for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List all categories ordered by name.
    async fn list(&self) -> StoreResult<Vec<Category>>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Category>>;

    /// Fetch every category whose id is in `ids`. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<Category>>;

    /// Find a category by name, ignoring case.
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Category>>;

    async fn create(&self, fields: &CategoryFields, created_by: DbId) -> StoreResult<Category>;

    /// Replace a category's fields. Returns `None` if it does not exist.
    async fn update(&self, id: DbId, fields: &CategoryFields) -> StoreResult<Option<Category>>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: DbId) -> StoreResult<bool>;
}

/// Persistence for exercises.
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// List all exercises ordered by name.
    async fn list(&self) -> StoreResult<Vec<Exercise>>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Exercise>>;

    /// Fetch every exercise whose id is in `ids`. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<Exercise>>;

    /// Number of exercises referencing `category_id`.
    async fn count_by_category(&self, category_id: DbId) -> StoreResult<i64>;

    async fn create(&self, fields: &ExerciseFields, created_by: DbId) -> StoreResult<Exercise>;

    /// Replace an exercise's fields. Returns `None` if it does not exist.
    async fn update(&self, id: DbId, fields: &ExerciseFields) -> StoreResult<Option<Exercise>>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: DbId) -> StoreResult<bool>;
}

/// Persistence for trainings and their exercise slots.
///
/// Implementations write the header and its children as one unit.
#[async_trait]
pub trait TrainingRepository: Send + Sync {
    /// List the trainings created by `created_by`, newest first.
    async fn list_by_creator(&self, created_by: DbId) -> StoreResult<Vec<Training>>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Training>>;

    /// Exact, case-sensitive share id lookup.
    async fn find_by_share_id(&self, share_id: &str) -> StoreResult<Option<Training>>;

    async fn share_id_exists(&self, share_id: &str) -> StoreResult<bool>;

    /// Insert a training and its slots.
    ///
    /// Fails with a conflict if `share_id` is already taken.
    async fn create(
        &self,
        fields: &TrainingFields,
        created_by: DbId,
        share_id: &str,
    ) -> StoreResult<Training>;

    /// Replace the header fields and the whole slot list. The share id and
    /// creator are kept. Returns `None` if the training does not exist.
    async fn update(&self, id: DbId, fields: &TrainingFields) -> StoreResult<Option<Training>>;

    /// Delete the slots, then the training. Returns `true` if it existed.
    async fn delete(&self, id: DbId) -> StoreResult<bool>;
}

/// Persistence for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List all users ordered by id.
    async fn list(&self) -> StoreResult<Vec<User>>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<User>>;

    /// Find a user by (lowercased) email.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Fails with a conflict if the email is already registered.
    async fn create(&self, input: &NewUser) -> StoreResult<User>;

    /// Apply the provided changes. Returns `None` if the user does not exist.
    async fn update(&self, id: DbId, changes: &UserChanges) -> StoreResult<Option<User>>;
}
