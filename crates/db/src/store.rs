//! The [`Store`] handle shared by every request.

use std::sync::Arc;

use crate::memory::MemoryStore;
use crate::repositories::{
    CategoryRepository, ExerciseRepository, PgCategoryRepo, PgExerciseRepo, PgTrainingRepo,
    PgUserRepo, TrainingRepository, UserRepository,
};
use crate::DbPool;

/// Which implementation backs a [`Store`].
#[derive(Debug, Clone)]
pub enum Backend {
    Postgres(DbPool),
    Memory,
}

/// One implementation of each repository trait, cheap to clone.
#[derive(Clone)]
pub struct Store {
    pub categories: Arc<dyn CategoryRepository>,
    pub exercises: Arc<dyn ExerciseRepository>,
    pub trainings: Arc<dyn TrainingRepository>,
    pub users: Arc<dyn UserRepository>,
    backend: Backend,
}

impl Store {
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            categories: Arc::new(PgCategoryRepo::new(pool.clone())),
            exercises: Arc::new(PgExerciseRepo::new(pool.clone())),
            trainings: Arc::new(PgTrainingRepo::new(pool.clone())),
            users: Arc::new(PgUserRepo::new(pool.clone())),
            backend: Backend::Postgres(pool),
        }
    }

    /// A fresh, empty in-process store.
    pub fn in_memory() -> Self {
        let memory = MemoryStore::new();
        Self {
            categories: Arc::new(memory.clone()),
            exercises: Arc::new(memory.clone()),
            trainings: Arc::new(memory.clone()),
            users: Arc::new(memory),
            backend: Backend::Memory,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory => "memory",
        }
    }

    /// Whether the backing database answers. Always `true` in memory.
    pub async fn health_check(&self) -> bool {
        match &self.backend {
            Backend::Postgres(pool) => match crate::health_check(pool).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "Database health check failed");
                    false
                }
            },
            Backend::Memory => true,
        }
    }
}
