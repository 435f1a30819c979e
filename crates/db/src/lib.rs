//! Persistence layer for the Sanse training planner.
//!
//! Repository traits live in [`repositories`]; they are implemented by the
//! PostgreSQL repositories in the same module and by the in-process store in
//! [`memory`]. [`Store`] bundles one implementation of each trait, and
//! [`aggregate`] builds the denormalized training views on top of it.

use sqlx::postgres::PgPoolOptions;

pub mod aggregate;
pub mod error;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::Store;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations under `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
