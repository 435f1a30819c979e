//! Repository for the `exercises` table.

use async_trait::async_trait;
use sanse_core::types::DbId;
use sqlx::PgPool;

use super::ExerciseRepository;
use crate::error::StoreResult;
use crate::models::exercise::{Exercise, ExerciseFields};

/// Column list for `exercises` queries.
const COLUMNS: &str = "\
    id, name, description, estimated_time, category_id, \
    created_by, created_at, updated_at";

/// PostgreSQL-backed [`ExerciseRepository`].
#[derive(Clone)]
pub struct PgExerciseRepo {
    pool: PgPool,
}

impl PgExerciseRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExerciseRepository for PgExerciseRepo {
    async fn list(&self) -> StoreResult<Vec<Exercise>> {
        let query = format!("SELECT {COLUMNS} FROM exercises ORDER BY name, id");
        let rows = sqlx::query_as::<_, Exercise>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Exercise>> {
        let query = format!("SELECT {COLUMNS} FROM exercises WHERE id = $1");
        let row = sqlx::query_as::<_, Exercise>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<Exercise>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM exercises WHERE id = ANY($1)");
        let rows = sqlx::query_as::<_, Exercise>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count_by_category(&self, category_id: DbId) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM exercises WHERE category_id = $1",
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn create(&self, fields: &ExerciseFields, created_by: DbId) -> StoreResult<Exercise> {
        let query = format!(
            "INSERT INTO exercises (name, description, estimated_time, category_id, created_by) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Exercise>(&query)
            .bind(&fields.name)
            .bind(&fields.description)
            .bind(fields.estimated_time)
            .bind(fields.category_id)
            .bind(created_by)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: DbId, fields: &ExerciseFields) -> StoreResult<Option<Exercise>> {
        let query = format!(
            "UPDATE exercises SET \
                 name = $2, \
                 description = $3, \
                 estimated_time = $4, \
                 category_id = $5, \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Exercise>(&query)
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.description)
            .bind(fields.estimated_time)
            .bind(fields.category_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
