//! SQLite database operations
//!
//! All database access goes through this module. The user, follow graph
//! and tweet stores are `impl Database` blocks in their own files.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;

use crate::error::AppError;

/// Database connection pool wrapper.
pub struct Database {
    pub(super) pool: Pool<Sqlite>,
}

/// Translate constraint violations into business errors.
///
/// Unique violations become `Conflict`, foreign-key violations become
/// `NotFound`; every other failure stays an infrastructure error.
pub(super) fn map_constraint_error(error: sqlx::Error, conflict: &str) -> AppError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            return AppError::Conflict(conflict.to_string());
        }
        if db_error.is_foreign_key_violation() {
            return AppError::NotFound;
        }
    }
    AppError::Database(error)
}

impl Database {
    /// Connect to SQLite database
    ///
    /// Creates the database file if it doesn't exist.
    /// Runs pending migrations automatically.
    ///
    /// # Arguments
    /// * `path` - Path to SQLite database file
    ///
    /// # Errors
    /// Returns error if connection or migration fails
    pub async fn connect(path: &Path) -> Result<Self, AppError> {
        Self::connect_with_pool_size(path, 5).await
    }

    /// Connect with an explicit pool size
    pub async fn connect_with_pool_size(
        path: &Path,
        max_connections: u32,
    ) -> Result<Self, AppError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Database(sqlx::Error::Io(e)))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Migration failed: {}", e);
                AppError::Internal(anyhow::anyhow!("Migration failed: {}", e))
            })?;

        tracing::info!(path = %path.display(), "Database connected and migrated successfully");

        Ok(Self { pool })
    }
}
