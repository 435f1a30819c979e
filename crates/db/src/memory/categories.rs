use async_trait::async_trait;
use chrono::Utc;
use sanse_core::category::names_collide;
use sanse_core::types::DbId;

use super::{next_id, MemoryStore};
use crate::error::{StoreError, StoreResult};
use crate::models::category::{Category, CategoryFields};
use crate::repositories::CategoryRepository;

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Category>> {
        let state = self.state.read().await;
        let mut categories = state.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(categories)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Category>> {
        let state = self.state.read().await;
        Ok(state.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<Category>> {
        let state = self.state.read().await;
        Ok(state
            .categories
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        let state = self.state.read().await;
        Ok(state
            .categories
            .iter()
            .find(|c| names_collide(&c.name, name))
            .cloned())
    }

    async fn create(&self, fields: &CategoryFields, created_by: DbId) -> StoreResult<Category> {
        let mut state = self.state.write().await;
        if state
            .categories
            .iter()
            .any(|c| names_collide(&c.name, &fields.name))
        {
            return Err(StoreError::Conflict(format!(
                "category name '{}' already exists",
                fields.name
            )));
        }

        let now = Utc::now();
        let category = Category {
            id: next_id(&mut state.sequences.category),
            name: fields.name.clone(),
            color: fields.color.clone(),
            created_by,
            created_at: now,
            updated_at: now,
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn update(&self, id: DbId, fields: &CategoryFields) -> StoreResult<Option<Category>> {
        let mut state = self.state.write().await;
        if state
            .categories
            .iter()
            .any(|c| c.id != id && names_collide(&c.name, &fields.name))
        {
            return Err(StoreError::Conflict(format!(
                "category name '{}' already exists",
                fields.name
            )));
        }

        let Some(category) = state.categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        category.name = fields.name.clone();
        category.color = fields.color.clone();
        category.updated_at = Utc::now();
        Ok(Some(category.clone()))
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        if state.exercises.iter().any(|e| e.category_id == id) {
            return Err(StoreError::Conflict(format!(
                "category {id} is still referenced by exercises"
            )));
        }
        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        Ok(state.categories.len() < before)
    }
}
