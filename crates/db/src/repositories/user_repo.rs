//! Repository for the `users` table.

use async_trait::async_trait;
use sanse_core::types::DbId;
use sqlx::PgPool;

use super::UserRepository;
use crate::error::StoreResult;
use crate::models::user::{NewUser, User, UserChanges};

/// Column list for `users` queries.
const COLUMNS: &str = "\
    id, email, password_hash, role, full_name, is_active, \
    created_at, updated_at";

/// PostgreSQL-backed [`UserRepository`].
#[derive(Clone)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepo {
    async fn list(&self) -> StoreResult<Vec<User>> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        let rows = sqlx::query_as::<_, User>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, input: &NewUser) -> StoreResult<User> {
        let query = format!(
            "INSERT INTO users (email, password_hash, role, full_name) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(&input.full_name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Uses `COALESCE` so only provided fields are changed.
    async fn update(&self, id: DbId, changes: &UserChanges) -> StoreResult<Option<User>> {
        let query = format!(
            "UPDATE users SET \
                 email = COALESCE($2, email), \
                 password_hash = COALESCE($3, password_hash), \
                 role = COALESCE($4, role), \
                 full_name = COALESCE($5, full_name), \
                 is_active = COALESCE($6, is_active), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&changes.email)
            .bind(&changes.password_hash)
            .bind(&changes.role)
            .bind(&changes.full_name)
            .bind(changes.is_active)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
