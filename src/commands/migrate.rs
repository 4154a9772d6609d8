//! Database migration command.

use lessonhub_core::config::{AppConfig, DatabaseBackend};
use lessonhub_core::error::AppError;
use lessonhub_database::DatabasePool;
use lessonhub_database::migration::run_migrations;

use super::CommandError;
use crate::output;

/// Apply pending migrations to the configured PostgreSQL database.
pub async fn execute(config: &AppConfig) -> Result<(), CommandError> {
    if config.database.backend != DatabaseBackend::Postgres {
        return Err(AppError::configuration("migrate requires database.backend = \"postgres\"").into());
    }

    let pool = DatabasePool::connect(&config.database).await?;
    let result = run_migrations(&pool).await;
    pool.close().await;
    result?;

    output::print_json(&serde_json::json!({ "migrated": true }));
    Ok(())
}
