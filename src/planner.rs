//! Meal plan assembly
//!
//! Runs the target calculator once, splits the calories across the meal
//! slots and scales every catalog option for the slot's share. Everything
//! here is pure; profile state comes in as parameters.

use chrono::{DateTime, Datelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::catalog::MealSlot;
use crate::models::{ReferenceSnapshot, UserMetrics, UserProfile};
use crate::portions::{scale_template, ScaleFactors, ScaledPortion};
use crate::targets::{compute_lean_mass, DailyTargets, DayType, Goal};

/// ---------------------------------------------------------------------------
/// Training Week
/// ---------------------------------------------------------------------------

/// Fixed weekly schedule
pub fn scheduled_day_type(weekday: Weekday) -> DayType {
  match weekday {
    Weekday::Mon => DayType::GymDay,
    Weekday::Tue => DayType::HighIntensityDay,
    Weekday::Wed => DayType::RestDay,
    Weekday::Thu => DayType::HighIntensityDay,
    Weekday::Fri => DayType::GymDay,
    Weekday::Sat => DayType::OlympicLiftDay,
    Weekday::Sun => DayType::RestDay,
  }
}

pub fn todays_day_type() -> DayType {
  scheduled_day_type(Utc::now().weekday())
}

/// ---------------------------------------------------------------------------
/// Meal Plan
/// ---------------------------------------------------------------------------

/// Calories for one slot: daily calories (rounded) * slot share * carb priority
pub fn meal_calories(daily_calories: f64, slot: MealSlot, day_type: DayType) -> i64 {
  (daily_calories.round() * slot.calorie_share() * day_type.carb_priority()).round() as i64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealOption {
  /// 1-based position in the catalog
  pub option: usize,
  pub portion: ScaledPortion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotPlan {
  pub slot: MealSlot,
  pub meal_calories: i64,
  pub options: Vec<MealOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlan {
  pub goal: Goal,
  pub day_type: DayType,
  pub carb_priority: f64,
  pub targets: DailyTargets,
  pub slots: Vec<SlotPlan>,
}

impl MealPlan {
  pub fn build(
    metrics: &UserMetrics,
    goal: Goal,
    day_type: DayType,
    reference: &ReferenceSnapshot,
  ) -> Self {
    let targets = DailyTargets::compute(metrics, goal, day_type);

    let slots = MealSlot::ALL
      .iter()
      .map(|&slot| {
        let kcal = meal_calories(targets.calories, slot, day_type);
        let options = slot
          .templates()
          .iter()
          .enumerate()
          .map(|(i, template)| MealOption {
            option: i + 1,
            portion: scale_template(template, kcal as f64, metrics, reference),
          })
          .collect();

        SlotPlan {
          slot,
          meal_calories: kcal,
          options,
        }
      })
      .collect();

    Self {
      goal,
      day_type,
      carb_priority: day_type.carb_priority(),
      targets,
      slots,
    }
  }

  pub fn for_profile(profile: &UserProfile, day_type: DayType) -> Self {
    Self::build(&profile.metrics, profile.goal, day_type, &profile.reference)
  }

  pub fn slot(&self, slot: MealSlot) -> Option<&SlotPlan> {
    self.slots.iter().find(|s| s.slot == slot)
  }
}

/// ---------------------------------------------------------------------------
/// Diagnostics
/// ---------------------------------------------------------------------------

/// Why portions do (or do not) move: the reference, the current body and
/// the body ratios every template sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostics {
  pub metrics: UserMetrics,
  pub reference: ReferenceSnapshot,
  pub reference_set_at: Option<DateTime<Utc>>,
  pub current_lean_mass_kg: f64,
  pub reference_lean_mass_kg: f64,
  pub weight_ratio: f64,
  pub lean_ratio: f64,

  /// Metrics were saved after the reference but the weight ratio is still
  /// exactly 1.0, so portions will not move
  pub stale_reference: bool,

  /// Targets for a gym day under the current goal
  pub gym_day_targets: DailyTargets,
}

impl Diagnostics {
  pub fn compute(profile: &UserProfile) -> Self {
    // Calorie fit is irrelevant here; feed a neutral target
    let unrounded = ScaleFactors::compute(1.0, 1.0, &profile.metrics, &profile.reference);
    let factors = unrounded.rounded();

    let saved_after_reference = match (profile.updated_at, profile.reference_set_at) {
      (Some(updated), Some(reference_set)) => updated > reference_set,
      (Some(_), None) => true,
      (None, _) => false,
    };

    Self {
      metrics: profile.metrics.clone(),
      reference: profile.reference,
      reference_set_at: profile.reference_set_at,
      current_lean_mass_kg: round2(compute_lean_mass(&profile.metrics)),
      reference_lean_mass_kg: round2(profile.reference.lean_mass_kg()),
      weight_ratio: factors.weight_ratio,
      lean_ratio: factors.lean_ratio,
      stale_reference: saved_after_reference && unrounded.weight_ratio == 1.0,
      gym_day_targets: DailyTargets::compute(&profile.metrics, profile.goal, DayType::GymDay),
    }
  }
}

fn round2(value: f64) -> f64 {
  (value * 100.0).round() / 100.0
}
