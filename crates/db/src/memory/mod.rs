//! In-process implementation of every repository trait.
//!
//! All collections sit behind one [`RwLock`], and each repository call holds
//! it for its whole read or write, so a training header and its slots always
//! change together. Unique and restrict rules mirror the PostgreSQL schema
//! and are reported as [`StoreError::Conflict`](crate::StoreError::Conflict).

use std::sync::Arc;

use sanse_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::category::Category;
use crate::models::exercise::Exercise;
use crate::models::training::Training;
use crate::models::user::User;

mod categories;
mod exercises;
mod trainings;
mod users;

/// Shared in-memory store. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    categories: Vec<Category>,
    exercises: Vec<Exercise>,
    trainings: Vec<Training>,
    users: Vec<User>,
    sequences: Sequences,
}

/// Per-collection id sequences. Ids are never reused after a delete.
#[derive(Debug, Default)]
struct Sequences {
    category: DbId,
    exercise: DbId,
    training: DbId,
    user: DbId,
}

fn next_id(sequence: &mut DbId) -> DbId {
    *sequence += 1;
    *sequence
}
