use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PlanError {
  #[error("Database error: {0}")]
  Database(String),

  #[error("Migration failed: {0}")]
  Migration(String),

  #[error("Invalid configuration: {0}")]
  Config(String),

  #[error("Invalid metrics: {0}")]
  InvalidMetrics(String),

  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Parse error: {0}")]
  Parse(String),
}

impl From<sqlx::Error> for PlanError {
  fn from(e: sqlx::Error) -> Self {
    PlanError::Database(e.to_string())
  }
}

impl From<sqlx::migrate::MigrateError> for PlanError {
  fn from(e: sqlx::migrate::MigrateError) -> Self {
    PlanError::Migration(e.to_string())
  }
}
