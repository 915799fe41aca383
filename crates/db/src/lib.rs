//! Read-only PostgreSQL access to the caregiver records the form validators
//! consult.

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod snapshot;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub use config::DbConfig;
pub use error::DbError;
pub use snapshot::{validate_submission, SubjectSnapshot};

pub type DbPool = PgPool;

/// Create a connection pool from `config`.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.database_url)
        .await?;
    tracing::info!(
        max_connections = config.max_connections,
        "Database connection pool created"
    );
    Ok(pool)
}
