use async_trait::async_trait;
use chrono::Utc;
use sanse_core::types::DbId;

use super::{next_id, MemoryStore};
use crate::error::{StoreError, StoreResult};
use crate::models::training::{Training, TrainingFields};
use crate::repositories::TrainingRepository;

#[async_trait]
impl TrainingRepository for MemoryStore {
    async fn list_by_creator(&self, created_by: DbId) -> StoreResult<Vec<Training>> {
        let state = self.state.read().await;
        let mut trainings: Vec<Training> = state
            .trainings
            .iter()
            .filter(|t| t.created_by == created_by)
            .cloned()
            .collect();
        trainings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(trainings)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Training>> {
        let state = self.state.read().await;
        Ok(state.trainings.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_share_id(&self, share_id: &str) -> StoreResult<Option<Training>> {
        let state = self.state.read().await;
        Ok(state
            .trainings
            .iter()
            .find(|t| t.share_id == share_id)
            .cloned())
    }

    async fn share_id_exists(&self, share_id: &str) -> StoreResult<bool> {
        let state = self.state.read().await;
        Ok(state.trainings.iter().any(|t| t.share_id == share_id))
    }

    async fn create(
        &self,
        fields: &TrainingFields,
        created_by: DbId,
        share_id: &str,
    ) -> StoreResult<Training> {
        let mut state = self.state.write().await;
        if state.trainings.iter().any(|t| t.share_id == share_id) {
            return Err(StoreError::Conflict(format!(
                "share id '{share_id}' is already in use"
            )));
        }

        let now = Utc::now();
        let training = Training {
            id: next_id(&mut state.sequences.training),
            name: fields.name.clone(),
            categories: fields.categories.clone(),
            exercises: fields.exercises.clone(),
            total_time: fields.total_time(),
            observations: fields.observations.clone(),
            created_by,
            share_id: share_id.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.trainings.push(training.clone());
        Ok(training)
    }

    async fn update(&self, id: DbId, fields: &TrainingFields) -> StoreResult<Option<Training>> {
        let mut state = self.state.write().await;
        let Some(training) = state.trainings.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        training.name = fields.name.clone();
        training.categories = fields.categories.clone();
        training.exercises = fields.exercises.clone();
        training.total_time = fields.total_time();
        training.observations = fields.observations.clone();
        training.updated_at = Utc::now();
        Ok(Some(training.clone()))
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let before = state.trainings.len();
        state.trainings.retain(|t| t.id != id);
        Ok(state.trainings.len() < before)
    }
}
