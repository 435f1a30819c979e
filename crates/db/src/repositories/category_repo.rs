//! Repository for the `categories` table.

use async_trait::async_trait;
use sanse_core::types::DbId;
use sqlx::PgPool;

use super::CategoryRepository;
use crate::error::StoreResult;
use crate::models::category::{Category, CategoryFields};

/// Column list for `categories` queries.
const COLUMNS: &str = "id, name, color, created_by, created_at, updated_at";

/// PostgreSQL-backed [`CategoryRepository`].
#[derive(Clone)]
pub struct PgCategoryRepo {
    pool: PgPool,
}

impl PgCategoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepo {
    async fn list(&self) -> StoreResult<Vec<Category>> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name, id");
        let rows = sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Category>> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        let row = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = ANY($1)");
        let rows = sqlx::query_as::<_, Category>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        // Matches the expression index `uq_categories_name`.
        let query = format!("SELECT {COLUMNS} FROM categories WHERE LOWER(name) = LOWER($1)");
        let row = sqlx::query_as::<_, Category>(&query)
            .bind(name.trim())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, fields: &CategoryFields, created_by: DbId) -> StoreResult<Category> {
        let query = format!(
            "INSERT INTO categories (name, color, created_by) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Category>(&query)
            .bind(&fields.name)
            .bind(&fields.color)
            .bind(created_by)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: DbId, fields: &CategoryFields) -> StoreResult<Option<Category>> {
        let query = format!(
            "UPDATE categories SET name = $2, color = $3, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.color)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
