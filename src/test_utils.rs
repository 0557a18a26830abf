//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Metrics factories
//! - History seeding

use crate::models::{NewHistoryEntry, Sex, UserMetrics};
use chrono::{Duration, Utc};
use sqlx::SqlitePool;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Seed one history entry per day, ending today, losing 0.2 kg per day
pub async fn seed_test_history(pool: &SqlitePool, days: usize) -> Vec<i64> {
  let mut ids = Vec::new();
  let today = Utc::now().date_naive();

  for i in 0..days {
    let days_ago = (days - 1 - i) as i64;
    let entry = NewHistoryEntry {
      date: today - Duration::days(days_ago),
      weight_kg: 92.1 - 0.2 * i as f64,
      body_fat_pct: 37.9 - 0.1 * i as f64,
    };

    let result = sqlx::query(
      "INSERT INTO history (date, weight_kg, body_fat_pct) VALUES (?1, ?2, ?3)",
    )
    .bind(entry.date)
    .bind(entry.weight_kg)
    .bind(entry.body_fat_pct)
    .execute(pool)
    .await
    .expect("Failed to insert test history");

    ids.push(result.last_insert_rowid());
  }

  ids
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Metrics like the default profile with a different weight and body fat
pub fn mock_metrics(weight_kg: f64, body_fat_pct: f64) -> UserMetrics {
  UserMetrics {
    weight_kg,
    height_cm: 186.0,
    age_years: 42,
    sex: Sex::Male,
    body_fat_pct,
    resting_metabolic_rate_kcal: 0.0,
  }
}

/// ---------------------------------------------------------------------------
/// Helper Assertions
/// ---------------------------------------------------------------------------

/// Assert two floats are within tolerance
pub fn assert_approx_eq(actual: f64, expected: f64, tolerance: f64) {
  assert!(
    (actual - expected).abs() < tolerance,
    "Expected {} to be within {} of {}",
    actual,
    tolerance,
    expected
  );
}
