//! Repository Module
//!
//! Free functions over a `SqlitePool`: order lifecycle, catalog lookups
//! and sales reporting. Handlers convert [`RepoError`] into the API error
//! envelope through the `From` impl below.

pub mod catalog;
pub mod order;
pub mod report;

use shared::AppError;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database busy: {0}")]
    ResourceExhausted(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            // Pool saturation is retryable; keep it distinct from real failures
            sqlx::Error::PoolTimedOut => {
                RepoError::ResourceExhausted("connection pool exhausted".into())
            }
            sqlx::Error::RowNotFound => RepoError::NotFound("row not found".into()),
            other => RepoError::Database(other.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::ResourceExhausted(msg) => AppError::resource_exhausted(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
pub(crate) mod testing {
    use sqlx::SqlitePool;

    /// Fresh in-memory database with migrations applied and a small
    /// catalog seeded: products 1 ("Classic Tee") and 2 ("Mug"),
    /// variant 11 ("Size M") belonging to product 1.
    pub async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("open in-memory db");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("run migrations");

        sqlx::query(
            "INSERT INTO products (id, name, created_at) VALUES \
             (1, 'Classic Tee', 0), (2, 'Mug', 0)",
        )
        .execute(&pool)
        .await
        .expect("seed products");
        sqlx::query(
            "INSERT INTO product_variants (id, product_id, name, created_at) VALUES \
             (11, 1, 'Size M', 0)",
        )
        .execute(&pool)
        .await
        .expect("seed variants");

        pool
    }
}
