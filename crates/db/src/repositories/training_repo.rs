//! Repository for the `trainings` and `training_exercises` tables.
//!
//! Header and slot writes share one transaction, so readers never observe a
//! training with a half-replaced slot list.

use std::collections::HashMap;

use async_trait::async_trait;
use sanse_core::types::{DbId, Minutes};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use super::TrainingRepository;
use crate::error::StoreResult;
use crate::models::training::{Training, TrainingExercise, TrainingFields};

/// Column list for the `trainings` table.
const COLUMNS: &str = "\
    id, name, categories, total_time, observations, created_by, share_id, \
    created_at, updated_at";

/// A `training_exercises` row, keyed by its parent.
#[derive(Debug, FromRow)]
struct SlotRow {
    training_id: DbId,
    exercise_id: DbId,
    custom_time: Minutes,
    exercise_order: i32,
}

/// PostgreSQL-backed [`TrainingRepository`].
#[derive(Clone)]
pub struct PgTrainingRepo {
    pool: PgPool,
}

impl PgTrainingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach slots to each training, in insertion order.
    async fn with_slots(&self, mut trainings: Vec<Training>) -> StoreResult<Vec<Training>> {
        if trainings.is_empty() {
            return Ok(trainings);
        }
        let ids: Vec<DbId> = trainings.iter().map(|t| t.id).collect();
        let rows = sqlx::query_as::<_, SlotRow>(
            "SELECT training_id, exercise_id, custom_time, exercise_order \
             FROM training_exercises \
             WHERE training_id = ANY($1) \
             ORDER BY training_id, id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_training: HashMap<DbId, Vec<TrainingExercise>> = HashMap::new();
        for row in rows {
            by_training
                .entry(row.training_id)
                .or_default()
                .push(TrainingExercise {
                    exercise_id: row.exercise_id,
                    custom_time: row.custom_time,
                    order: row.exercise_order,
                });
        }

        for training in &mut trainings {
            training.exercises = by_training.remove(&training.id).unwrap_or_default();
        }
        Ok(trainings)
    }

    async fn one_with_slots(&self, training: Option<Training>) -> StoreResult<Option<Training>> {
        match training {
            Some(training) => Ok(self.with_slots(vec![training]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Insert the slot list for `training_id` within an existing transaction.
    async fn insert_slots(
        tx: &mut Transaction<'_, Postgres>,
        training_id: DbId,
        slots: &[TrainingExercise],
    ) -> Result<(), sqlx::Error> {
        if slots.is_empty() {
            return Ok(());
        }
        let exercise_ids: Vec<DbId> = slots.iter().map(|s| s.exercise_id).collect();
        let custom_times: Vec<Minutes> = slots.iter().map(|s| s.custom_time).collect();
        let orders: Vec<i32> = slots.iter().map(|s| s.order).collect();

        sqlx::query(
            "INSERT INTO training_exercises \
                 (training_id, exercise_id, custom_time, exercise_order) \
             SELECT $1, u.exercise_id, u.custom_time, u.exercise_order \
             FROM UNNEST($2::BIGINT[], $3::INTEGER[], $4::INTEGER[]) \
                 WITH ORDINALITY AS u(exercise_id, custom_time, exercise_order, ord) \
             ORDER BY u.ord",
        )
        .bind(training_id)
        .bind(&exercise_ids)
        .bind(&custom_times)
        .bind(&orders)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn delete_slots(
        tx: &mut Transaction<'_, Postgres>,
        training_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM training_exercises WHERE training_id = $1")
            .bind(training_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl TrainingRepository for PgTrainingRepo {
    async fn list_by_creator(&self, created_by: DbId) -> StoreResult<Vec<Training>> {
        let query = format!(
            "SELECT {COLUMNS} FROM trainings \
             WHERE created_by = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        let trainings = sqlx::query_as::<_, Training>(&query)
            .bind(created_by)
            .fetch_all(&self.pool)
            .await?;
        self.with_slots(trainings).await
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Training>> {
        let query = format!("SELECT {COLUMNS} FROM trainings WHERE id = $1");
        let training = sqlx::query_as::<_, Training>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        self.one_with_slots(training).await
    }

    async fn find_by_share_id(&self, share_id: &str) -> StoreResult<Option<Training>> {
        let query = format!("SELECT {COLUMNS} FROM trainings WHERE share_id = $1");
        let training = sqlx::query_as::<_, Training>(&query)
            .bind(share_id)
            .fetch_optional(&self.pool)
            .await?;
        self.one_with_slots(training).await
    }

    async fn share_id_exists(&self, share_id: &str) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM trainings WHERE share_id = $1)",
        )
        .bind(share_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn create(
        &self,
        fields: &TrainingFields,
        created_by: DbId,
        share_id: &str,
    ) -> StoreResult<Training> {
        let mut tx = self.pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO trainings \
                 (name, categories, total_time, observations, created_by, share_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let mut training = sqlx::query_as::<_, Training>(&insert_query)
            .bind(&fields.name)
            .bind(&fields.categories)
            .bind(fields.total_time())
            .bind(&fields.observations)
            .bind(created_by)
            .bind(share_id)
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_slots(&mut tx, training.id, &fields.exercises).await?;

        tx.commit().await?;
        training.exercises = fields.exercises.clone();
        Ok(training)
    }

    async fn update(&self, id: DbId, fields: &TrainingFields) -> StoreResult<Option<Training>> {
        let mut tx = self.pool.begin().await?;

        let update_query = format!(
            "UPDATE trainings SET \
                 name = $2, \
                 categories = $3, \
                 total_time = $4, \
                 observations = $5, \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let training = sqlx::query_as::<_, Training>(&update_query)
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.categories)
            .bind(fields.total_time())
            .bind(&fields.observations)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(mut training) = training else {
            return Ok(None);
        };

        Self::delete_slots(&mut tx, id).await?;
        Self::insert_slots(&mut tx, id, &fields.exercises).await?;

        tx.commit().await?;
        training.exercises = fields.exercises.clone();
        Ok(Some(training))
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        Self::delete_slots(&mut tx, id).await?;
        let result = sqlx::query("DELETE FROM trainings WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
