//! Server configuration
//!
//! All settings can be overridden through environment variables:
//!
//! | Env var | Default | Meaning |
//! |---------|---------|---------|
//! | WORK_DIR | /var/lib/preorder-hub | Working directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | Runtime environment |
//! | DB_MAX_CONNECTIONS | 10 | Connection pool size |
//! | DB_ACQUIRE_TIMEOUT_MS | 5000 | Pool acquire timeout before failing |
//! | LOG_LEVEL | info | Tracing level |

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database file and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Maximum pooled database connections
    pub db_max_connections: u32,
    /// How long connection acquisition may wait before failing.
    /// Saturation surfaces as a retryable error instead of hanging.
    pub db_acquire_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/preorder-hub".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10),
            db_acquire_timeout_ms: std::env::var("DB_ACQUIRE_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
        }
    }

    /// Override work dir and port, keeping everything else env-driven.
    /// Mostly used by tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Path of the SQLite database file
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("preorder.db")
    }
}
