//! Shared server state

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Server state handed to every request handler.
///
/// Cloning is cheap: the pool is an `Arc` internally and the config is
/// small and immutable. The pool is injected here at construction rather
/// than accessed as ambient global state, so tests can supply their own.
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }

    /// Open the database under `config.work_dir` and run migrations.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir).map_err(|e| {
            AppError::internal(format!(
                "Failed to create work dir {}: {e}",
                config.work_dir
            ))
        })?;

        let db = DbService::new(
            &config.db_path().to_string_lossy(),
            config.db_max_connections,
            config.db_acquire_timeout_ms,
        )
        .await?;

        Ok(Self::new(config.clone(), db.pool))
    }
}
