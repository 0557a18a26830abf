//! Profile and history commands

use chrono::NaiveDate;

use crate::db::AppState;
use crate::error::PlanError;
use crate::models::{HistoryEntry, NewHistoryEntry, UserMetrics, UserProfile};
use crate::profile;
use crate::targets::Goal;

pub async fn get_profile(state: &AppState) -> Result<UserProfile, PlanError> {
  profile::load_profile(&state.db).await
}

/// "Save": overwrite current metrics. Does not move the scaling reference.
pub async fn save_metrics(
  state: &AppState,
  metrics: UserMetrics,
  goal: Option<Goal>,
) -> Result<UserProfile, PlanError> {
  profile::save_metrics(&state.db, &metrics, goal).await
}

/// "Set new reference": current metrics become the scaling baseline
pub async fn set_reference(state: &AppState) -> Result<UserProfile, PlanError> {
  profile::set_reference(&state.db).await
}

pub async fn set_goal(state: &AppState, goal: Goal) -> Result<UserProfile, PlanError> {
  profile::set_goal(&state.db, goal).await
}

/// Append to the history log, dated today unless a date is given
pub async fn add_history_entry(
  state: &AppState,
  weight_kg: f64,
  body_fat_pct: f64,
  date: Option<NaiveDate>,
) -> Result<HistoryEntry, PlanError> {
  let mut entry = NewHistoryEntry::today(weight_kg, body_fat_pct);
  if let Some(date) = date {
    entry.date = date;
  }
  profile::append_history(&state.db, &entry).await
}

pub async fn get_history(state: &AppState) -> Result<Vec<HistoryEntry>, PlanError> {
  profile::list_history(&state.db).await
}
