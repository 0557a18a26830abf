//! Plan commands: targets, meal plan and diagnostics for the stored profile

use chrono::Weekday;

use crate::db::AppState;
use crate::error::PlanError;
use crate::planner::{scheduled_day_type, todays_day_type, Diagnostics, MealPlan};
use crate::profile::load_profile;
use crate::targets::{DailyTargets, DayType};

/// Targets for the given day type, or today's scheduled one
pub async fn get_daily_targets(
  state: &AppState,
  day_type: Option<DayType>,
) -> Result<DailyTargets, PlanError> {
  let profile = load_profile(&state.db).await?;
  let day_type = day_type.unwrap_or_else(todays_day_type);

  Ok(DailyTargets::compute(&profile.metrics, profile.goal, day_type))
}

pub async fn get_meal_plan(
  state: &AppState,
  day_type: Option<DayType>,
) -> Result<MealPlan, PlanError> {
  let profile = load_profile(&state.db).await?;
  let day_type = day_type.unwrap_or_else(todays_day_type);

  let plan = MealPlan::for_profile(&profile, day_type);
  tracing::debug!(
    day_type = %day_type,
    calories = plan.targets.calories,
    "Built meal plan"
  );

  Ok(plan)
}

pub async fn get_meal_plan_for_weekday(
  state: &AppState,
  weekday: Weekday,
) -> Result<MealPlan, PlanError> {
  get_meal_plan(state, Some(scheduled_day_type(weekday))).await
}

pub async fn get_diagnostics(state: &AppState) -> Result<Diagnostics, PlanError> {
  let profile = load_profile(&state.db).await?;
  let diagnostics = Diagnostics::compute(&profile);

  if diagnostics.stale_reference {
    tracing::warn!(
      weight_kg = profile.metrics.weight_kg,
      reference_weight_kg = profile.reference.weight_kg,
      "Weight ratio is exactly 1.0 after saving metrics; portions will not scale until the reference differs"
    );
  }

  Ok(diagnostics)
}
