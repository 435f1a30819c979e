use async_trait::async_trait;
use chrono::Utc;
use sanse_core::types::DbId;

use super::{next_id, MemoryStore};
use crate::error::{StoreError, StoreResult};
use crate::models::category::Category;
use crate::models::exercise::{Exercise, ExerciseFields};
use crate::repositories::ExerciseRepository;

/// Mirrors `fk_exercises_category`.
fn ensure_category_exists(categories: &[Category], id: DbId) -> StoreResult<()> {
    if categories.iter().any(|c| c.id == id) {
        Ok(())
    } else {
        Err(StoreError::Conflict(format!("category {id} does not exist")))
    }
}

#[async_trait]
impl ExerciseRepository for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Exercise>> {
        let state = self.state.read().await;
        let mut exercises = state.exercises.clone();
        exercises.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(exercises)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Exercise>> {
        let state = self.state.read().await;
        Ok(state.exercises.iter().find(|e| e.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<Exercise>> {
        let state = self.state.read().await;
        Ok(state
            .exercises
            .iter()
            .filter(|e| ids.contains(&e.id))
            .cloned()
            .collect())
    }

    async fn count_by_category(&self, category_id: DbId) -> StoreResult<i64> {
        let state = self.state.read().await;
        let count = state
            .exercises
            .iter()
            .filter(|e| e.category_id == category_id)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn create(&self, fields: &ExerciseFields, created_by: DbId) -> StoreResult<Exercise> {
        let mut state = self.state.write().await;
        ensure_category_exists(&state.categories, fields.category_id)?;

        let now = Utc::now();
        let exercise = Exercise {
            id: next_id(&mut state.sequences.exercise),
            name: fields.name.clone(),
            description: fields.description.clone(),
            estimated_time: fields.estimated_time,
            category_id: fields.category_id,
            created_by,
            created_at: now,
            updated_at: now,
        };
        state.exercises.push(exercise.clone());
        Ok(exercise)
    }

    async fn update(&self, id: DbId, fields: &ExerciseFields) -> StoreResult<Option<Exercise>> {
        let mut state = self.state.write().await;
        ensure_category_exists(&state.categories, fields.category_id)?;

        let Some(exercise) = state.exercises.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        exercise.name = fields.name.clone();
        exercise.description = fields.description.clone();
        exercise.estimated_time = fields.estimated_time;
        exercise.category_id = fields.category_id;
        exercise.updated_at = Utc::now();
        Ok(Some(exercise.clone()))
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let before = state.exercises.len();
        state.exercises.retain(|e| e.id != id);
        Ok(state.exercises.len() < before)
    }
}
