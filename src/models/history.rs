use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One row of the append-only body metrics log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct HistoryEntry {
  pub id: i64,
  pub date: NaiveDate,
  pub weight_kg: f64,
  pub body_fat_pct: f64,
  pub created_at: Option<DateTime<Utc>>,
}

/// For appending new history entries (without id, created_at)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHistoryEntry {
  pub date: NaiveDate,
  pub weight_kg: f64,
  pub body_fat_pct: f64,
}

impl NewHistoryEntry {
  /// Entry dated today (UTC)
  pub fn today(weight_kg: f64, body_fat_pct: f64) -> Self {
    Self {
      date: Utc::now().date_naive(),
      weight_kg,
      body_fat_pct,
    }
  }
}
