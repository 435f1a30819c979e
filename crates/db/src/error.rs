/// Errors surfaced by repository implementations.
///
/// The PostgreSQL repositories pass sqlx errors through untouched so the API
/// layer can classify constraint violations; the in-memory store reports the
/// same conditions as [`StoreError::Conflict`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Duplicate value: {0}")]
    Conflict(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
