//! Profile and history storage
//!
//! The single user profile holds two independent things:
//! - current metrics, overwritten on every save
//! - the scaling reference, overwritten only by `set_reference`
//!
//! History is an append-only log that nothing in the engine reads.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use crate::error::PlanError;
use crate::models::{
    HistoryEntry, NewHistoryEntry, ReferenceSnapshot, Sex, UserMetrics, UserProfile,
};
use crate::targets::Goal;

fn parse_timestamp(raw: Option<String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Load the user profile (seeded with defaults by the initial migration)
pub async fn load_profile(pool: &SqlitePool) -> Result<UserProfile, PlanError> {
    let row = sqlx::query(
        r#"
        SELECT
            weight_kg, height_cm, age_years, sex, body_fat_pct,
            resting_metabolic_rate_kcal, goal,
            reference_weight_kg, reference_body_fat_pct,
            reference_set_at, updated_at
        FROM user_profile
        WHERE id = 1
        "#,
    )
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| PlanError::NotFound("user profile".to_string()))?;

    let sex: String = row.get("sex");
    let goal: String = row.get("goal");

    Ok(UserProfile {
        metrics: UserMetrics {
            weight_kg: row.get("weight_kg"),
            height_cm: row.get("height_cm"),
            age_years: row.get("age_years"),
            sex: sex.parse::<Sex>()?,
            body_fat_pct: row.get("body_fat_pct"),
            resting_metabolic_rate_kcal: row.get("resting_metabolic_rate_kcal"),
        },
        goal: goal.parse::<Goal>()?,
        reference: ReferenceSnapshot {
            weight_kg: row.get("reference_weight_kg"),
            body_fat_pct: row.get("reference_body_fat_pct"),
        },
        reference_set_at: parse_timestamp(row.get("reference_set_at")),
        updated_at: parse_timestamp(row.get("updated_at")),
    })
}

/// Overwrite the current metrics (and goal when given).
/// The reference snapshot is left untouched.
pub async fn save_metrics(
    pool: &SqlitePool,
    metrics: &UserMetrics,
    goal: Option<Goal>,
) -> Result<UserProfile, PlanError> {
    metrics.validate()?;

    let updated_at = Utc::now().to_rfc3339();
    let goal_str = goal.map(|g| g.to_string());

    let result = sqlx::query(
        r#"
        UPDATE user_profile
        SET weight_kg = ?,
            height_cm = ?,
            age_years = ?,
            sex = ?,
            body_fat_pct = ?,
            resting_metabolic_rate_kcal = ?,
            goal = COALESCE(?, goal),
            updated_at = ?
        WHERE id = 1
        "#,
    )
    .bind(metrics.weight_kg)
    .bind(metrics.height_cm)
    .bind(metrics.age_years)
    .bind(metrics.sex.to_string())
    .bind(metrics.body_fat_pct)
    .bind(metrics.resting_metabolic_rate_kcal)
    .bind(&goal_str)
    .bind(&updated_at)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(PlanError::NotFound("user profile".to_string()));
    }

    tracing::info!(
        weight_kg = metrics.weight_kg,
        body_fat_pct = metrics.body_fat_pct,
        "Saved metrics"
    );

    load_profile(pool).await
}

/// Make the current weight and body fat the new scaling baseline
pub async fn set_reference(pool: &SqlitePool) -> Result<UserProfile, PlanError> {
    let reference_set_at = Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"
        UPDATE user_profile
        SET reference_weight_kg = weight_kg,
            reference_body_fat_pct = body_fat_pct,
            reference_set_at = ?
        WHERE id = 1
        "#,
    )
    .bind(&reference_set_at)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(PlanError::NotFound("user profile".to_string()));
    }

    let profile = load_profile(pool).await?;
    tracing::info!(
        weight_kg = profile.reference.weight_kg,
        body_fat_pct = profile.reference.body_fat_pct,
        "Scaling reference reset"
    );

    Ok(profile)
}

pub async fn set_goal(pool: &SqlitePool, goal: Goal) -> Result<UserProfile, PlanError> {
    sqlx::query("UPDATE user_profile SET goal = ?, updated_at = ? WHERE id = 1")
        .bind(goal.to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await?;

    load_profile(pool).await
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

pub async fn append_history(
    pool: &SqlitePool,
    entry: &NewHistoryEntry,
) -> Result<HistoryEntry, PlanError> {
    if !(entry.weight_kg > 0.0) || !(0.0..100.0).contains(&entry.body_fat_pct) {
        return Err(PlanError::InvalidMetrics(format!(
            "history entry out of range: {} kg, {}% fat",
            entry.weight_kg, entry.body_fat_pct
        )));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO history (date, weight_kg, body_fat_pct)
        VALUES (?1, ?2, ?3)
        "#,
    )
    .bind(entry.date)
    .bind(entry.weight_kg)
    .bind(entry.body_fat_pct)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    tracing::debug!(id, date = %entry.date, "Appended history entry");

    sqlx::query_as::<_, HistoryEntry>(
        "SELECT id, date, weight_kg, body_fat_pct, created_at FROM history WHERE id = ?",
    )
    .bind(id)
    .fetch_one(pool)
    .await
    .map_err(PlanError::from)
}

/// All history entries, oldest first
pub async fn list_history(pool: &SqlitePool) -> Result<Vec<HistoryEntry>, PlanError> {
    let entries = sqlx::query_as::<_, HistoryEntry>(
        "SELECT id, date, weight_kg, body_fat_pct, created_at FROM history ORDER BY date, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(entries)
}
