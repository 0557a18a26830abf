use std::env;

use crate::error::PlanError;

pub const DATABASE_URL_VAR: &str = "NUTRITION_PLANNER_DATABASE_URL";
pub const MAX_CONNECTIONS_VAR: &str = "NUTRITION_PLANNER_MAX_CONNECTIONS";

const DEFAULT_DATABASE_URL: &str = "sqlite://nutrition-planner.db?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
  pub database_url: String,
  pub max_connections: u32,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      database_url: DEFAULT_DATABASE_URL.to_string(),
      max_connections: DEFAULT_MAX_CONNECTIONS,
    }
  }
}

impl AppConfig {
  /// Read configuration from the environment (call `dotenvy::dotenv()` first
  /// to pick up a `.env` file)
  pub fn from_env() -> Result<Self, PlanError> {
    let database_url = env::var(DATABASE_URL_VAR)
      .ok()
      .filter(|v| !v.trim().is_empty())
      .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

    let max_connections = match env::var(MAX_CONNECTIONS_VAR) {
      Ok(raw) => raw.trim().parse::<u32>().map_err(|_| {
        PlanError::Config(format!("{} must be a positive integer, got '{}'", MAX_CONNECTIONS_VAR, raw))
      })?,
      Err(_) => DEFAULT_MAX_CONNECTIONS,
    };

    if max_connections == 0 {
      return Err(PlanError::Config(format!("{} must be at least 1", MAX_CONNECTIONS_VAR)));
    }

    Ok(Self {
      database_url,
      max_connections,
    })
  }

  pub fn with_database_url(mut self, database_url: impl Into<String>) -> Self {
    self.database_url = database_url.into();
    self
  }
}
