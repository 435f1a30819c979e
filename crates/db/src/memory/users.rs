use async_trait::async_trait;
use chrono::Utc;
use sanse_core::types::DbId;

use super::{next_id, MemoryStore};
use crate::error::{StoreError, StoreResult};
use crate::models::user::{NewUser, User, UserChanges};
use crate::repositories::UserRepository;

#[async_trait]
impl UserRepository for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<User>> {
        let state = self.state.read().await;
        let mut users = state.users.clone();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, input: &NewUser) -> StoreResult<User> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.email == input.email) {
            return Err(StoreError::Conflict(format!(
                "email '{}' is already registered",
                input.email
            )));
        }

        let now = Utc::now();
        let user = User {
            id: next_id(&mut state.sequences.user),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role.clone(),
            full_name: input.full_name.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: DbId, changes: &UserChanges) -> StoreResult<Option<User>> {
        let mut state = self.state.write().await;
        if let Some(email) = &changes.email {
            if state.users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(StoreError::Conflict(format!(
                    "email '{email}' is already registered"
                )));
            }
        }

        let Some(user) = state.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(email) = &changes.email {
            user.email = email.clone();
        }
        if let Some(hash) = &changes.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(role) = &changes.role {
            user.role = role.clone();
        }
        if let Some(full_name) = &changes.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(is_active) = changes.is_active {
            user.is_active = is_active;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}
