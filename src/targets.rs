//! Deterministic target calculator
//!
//! Turns body metrics, a goal and the day's training type into a daily
//! calorie target and a protein/fat/carbohydrate split. Pure functions only;
//! callers own the metrics and may call this as often as they like.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::models::{Sex, UserMetrics};

/// Fixed activity factor applied to BMR (moderately active)
pub const ACTIVITY_FACTOR: f64 = 1.55;

/// Calorie safety band, as multiples of BMR
pub const CALORIE_FLOOR_BMR: f64 = 1.05;
pub const CALORIE_CEILING_BMR: f64 = 2.5;

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARB: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// ---------------------------------------------------------------------------
/// Goal
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
  /// Surplus, muscle gain
  Volume,
  /// Maintenance calories, shift body composition
  Recomposition,
  /// Deficit, fat loss
  Definition,
}

impl Goal {
  pub fn calorie_multiplier(&self) -> f64 {
    match self {
      Goal::Volume => 1.20,
      Goal::Recomposition => 1.00,
      Goal::Definition => 0.80,
    }
  }

  /// Fat target in g per kg of total body weight
  pub fn fat_g_per_kg(&self) -> f64 {
    match self {
      Goal::Volume => 0.95,
      Goal::Recomposition => 0.80,
      Goal::Definition => 0.65,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Goal::Volume => "volume",
      Goal::Recomposition => "recomposition",
      Goal::Definition => "definition",
    }
  }
}

impl std::fmt::Display for Goal {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for Goal {
  type Err = PlanError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "volume" | "bulk" => Ok(Goal::Volume),
      "recomposition" | "recomp" => Ok(Goal::Recomposition),
      "definition" | "cut" => Ok(Goal::Definition),
      _ => Err(PlanError::Parse(format!("Unknown goal: {}", s))),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Day Type
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
  GymDay,
  HighIntensityDay,
  OlympicLiftDay,
  RestDay,
}

impl DayType {
  pub const ALL: [DayType; 4] = [
    DayType::GymDay,
    DayType::HighIntensityDay,
    DayType::OlympicLiftDay,
    DayType::RestDay,
  ];

  pub fn calorie_factor(&self) -> f64 {
    match self {
      DayType::GymDay => 1.10,
      DayType::HighIntensityDay => 1.15,
      DayType::OlympicLiftDay => 1.12,
      DayType::RestDay => 0.95,
    }
  }

  /// Multiplier on each meal slot's calorie share
  pub fn carb_priority(&self) -> f64 {
    match self {
      DayType::HighIntensityDay | DayType::OlympicLiftDay => 1.15,
      DayType::RestDay => 0.90,
      DayType::GymDay => 1.0,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      DayType::GymDay => "gym_day",
      DayType::HighIntensityDay => "high_intensity_day",
      DayType::OlympicLiftDay => "olympic_lift_day",
      DayType::RestDay => "rest_day",
    }
  }
}

impl std::fmt::Display for DayType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for DayType {
  type Err = PlanError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().replace('-', "_").as_str() {
      "gym_day" | "gym" => Ok(DayType::GymDay),
      "high_intensity_day" | "high_intensity" | "crossfit" => Ok(DayType::HighIntensityDay),
      "olympic_lift_day" | "olympic_lift" | "weightlifting" => Ok(DayType::OlympicLiftDay),
      "rest_day" | "rest" => Ok(DayType::RestDay),
      _ => Err(PlanError::Parse(format!("Unknown day type: {}", s))),
    }
  }
}

/// ---------------------------------------------------------------------------
/// BMR and Lean Mass
/// ---------------------------------------------------------------------------

/// Basal metabolic rate. A measured resting rate always wins; otherwise
/// Mifflin-St Jeor: 10*kg + 6.25*cm - 5*age + (5 male | -161 female)
pub fn compute_bmr(metrics: &UserMetrics) -> f64 {
  if metrics.resting_metabolic_rate_kcal > 0.0 {
    return metrics.resting_metabolic_rate_kcal;
  }

  let sex_offset = match metrics.sex {
    Sex::Male => 5.0,
    Sex::Female => -161.0,
  };

  10.0 * metrics.weight_kg + 6.25 * metrics.height_cm - 5.0 * metrics.age_years as f64 + sex_offset
}

pub fn compute_lean_mass(metrics: &UserMetrics) -> f64 {
  metrics.weight_kg * (1.0 - metrics.body_fat_pct / 100.0)
}

/// Protein per kg of lean mass by body-fat tier: >=30% -> 2.2, <15% -> 1.6, else 2.0
pub fn protein_per_kg_lean(body_fat_pct: f64) -> f64 {
  if body_fat_pct >= 30.0 {
    2.2
  } else if body_fat_pct < 15.0 {
    1.6
  } else {
    2.0
  }
}

/// ---------------------------------------------------------------------------
/// Daily Targets
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTargets {
  /// kcal/day, measured or Mifflin-St Jeor
  pub bmr: f64,

  /// BMR * activity factor
  pub tdee: f64,

  /// Goal/day adjusted target, clamped to [1.05, 2.5] * BMR
  pub calories: f64,

  pub protein_g: i64,
  pub fat_g: i64,

  /// Residual after protein and fat, never negative
  pub carb_g: i64,

  /// Rounded to 2 decimals
  pub lean_mass_kg: f64,

  pub protein_per_kg_lean: f64,
}

impl DailyTargets {
  pub fn compute(metrics: &UserMetrics, goal: Goal, day_type: DayType) -> Self {
    let bmr = compute_bmr(metrics);
    let tdee = bmr * ACTIVITY_FACTOR;

    let adjusted = tdee * goal.calorie_multiplier() * day_type.calorie_factor();
    // Clamp last; max/min rather than f64::clamp so a degenerate BMR cannot panic
    let calories = adjusted
      .max(CALORIE_FLOOR_BMR * bmr)
      .min(CALORIE_CEILING_BMR * bmr);

    let lean = compute_lean_mass(metrics);
    let protein_per_kg_lean = protein_per_kg_lean(metrics.body_fat_pct);
    let protein_g = (protein_per_kg_lean * lean).round() as i64;

    let fat_g = (goal.fat_g_per_kg() * metrics.weight_kg).round() as i64;

    let protein_fat_kcal = protein_g as f64 * KCAL_PER_G_PROTEIN + fat_g as f64 * KCAL_PER_G_FAT;
    let carb_g = ((calories - protein_fat_kcal) / KCAL_PER_G_CARB).max(0.0).round() as i64;

    Self {
      bmr,
      tdee,
      calories,
      protein_g,
      fat_g,
      carb_g,
      lean_mass_kg: (lean * 100.0).round() / 100.0,
      protein_per_kg_lean,
    }
  }
}

/// Free-function form of [`DailyTargets::compute`]
pub fn compute_daily_targets(metrics: &UserMetrics, goal: Goal, day_type: DayType) -> DailyTargets {
  DailyTargets::compute(metrics, goal, day_type)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn reference_male() -> UserMetrics {
    UserMetrics {
      weight_kg: 92.1,
      height_cm: 186.0,
      age_years: 42,
      sex: Sex::Male,
      body_fat_pct: 37.9,
      resting_metabolic_rate_kcal: 0.0,
    }
  }

  #[test]
  fn test_bmr_mifflin_male() {
    // 921 + 1162.5 - 210 + 5
    let bmr = compute_bmr(&reference_male());
    assert!((bmr - 1878.5).abs() < 1e-9);
  }

  #[test]
  fn test_bmr_mifflin_female() {
    let metrics = UserMetrics {
      weight_kg: 60.0,
      height_cm: 165.0,
      age_years: 30,
      sex: Sex::Female,
      body_fat_pct: 25.0,
      resting_metabolic_rate_kcal: 0.0,
    };
    // 600 + 1031.25 - 150 - 161
    assert!((compute_bmr(&metrics) - 1320.25).abs() < 1e-9);
  }

  #[test]
  fn test_measured_rmr_overrides_formula() {
    let mut metrics = reference_male();
    metrics.resting_metabolic_rate_kcal = 1721.0;
    assert_eq!(compute_bmr(&metrics), 1721.0);

    metrics.weight_kg = 150.0;
    metrics.sex = Sex::Female;
    assert_eq!(compute_bmr(&metrics), 1721.0);
  }

  #[test]
  fn test_lean_mass() {
    let lean = compute_lean_mass(&reference_male());
    assert!((lean - 57.1941).abs() < 1e-4);

    let no_fat = UserMetrics { body_fat_pct: 0.0, ..reference_male() };
    assert_eq!(compute_lean_mass(&no_fat), 92.1);
  }

  #[test]
  fn test_protein_tiers_boundaries() {
    assert_eq!(protein_per_kg_lean(30.0), 2.2);
    assert_eq!(protein_per_kg_lean(29.99), 2.0);
    assert_eq!(protein_per_kg_lean(15.0), 2.0);
    assert_eq!(protein_per_kg_lean(14.99), 1.6);
    assert_eq!(protein_per_kg_lean(0.0), 1.6);
  }

  #[test]
  fn test_end_to_end_recomposition_gym_day() {
    let metrics = UserMetrics {
      resting_metabolic_rate_kcal: 1721.15,
      ..reference_male()
    };

    let targets = DailyTargets::compute(&metrics, Goal::Recomposition, DayType::GymDay);

    assert!((targets.bmr - 1721.15).abs() < 1e-9);
    assert!((targets.tdee - 2667.7825).abs() < 1e-6);
    assert!((targets.calories - 2934.56075).abs() < 1e-4);
    assert!((targets.lean_mass_kg - 57.19).abs() < 1e-9);
    assert_eq!(targets.protein_per_kg_lean, 2.2);
    assert_eq!(targets.protein_g, 126);
    assert_eq!(targets.fat_g, 74);
    // (2934.56 - (126*4 + 74*9)) / 4 = 441.14
    assert_eq!(targets.carb_g, 441);
  }

  #[test]
  fn test_goal_fat_rates() {
    let metrics = reference_male();
    let volume = DailyTargets::compute(&metrics, Goal::Volume, DayType::GymDay);
    let definition = DailyTargets::compute(&metrics, Goal::Definition, DayType::GymDay);

    assert_eq!(volume.fat_g, 87); // 0.95 * 92.1 = 87.495
    assert_eq!(definition.fat_g, 60); // 0.65 * 92.1 = 59.865
  }

  #[test]
  fn test_day_type_factors_order_calories() {
    let metrics = reference_male();
    let cal = |d| DailyTargets::compute(&metrics, Goal::Recomposition, d).calories;

    assert!(cal(DayType::HighIntensityDay) > cal(DayType::OlympicLiftDay));
    assert!(cal(DayType::OlympicLiftDay) > cal(DayType::GymDay));
    assert!(cal(DayType::GymDay) > cal(DayType::RestDay));
  }

  #[test]
  fn test_calories_always_within_bmr_band() {
    let bodies = [
      reference_male(),
      UserMetrics { weight_kg: 45.0, height_cm: 150.0, age_years: 80, sex: Sex::Female, body_fat_pct: 10.0, resting_metabolic_rate_kcal: 0.0 },
      UserMetrics { resting_metabolic_rate_kcal: 3000.0, ..reference_male() },
    ];
    let goals = [Goal::Volume, Goal::Recomposition, Goal::Definition];

    for metrics in &bodies {
      for goal in goals {
        for day in DayType::ALL {
          let t = DailyTargets::compute(metrics, goal, day);
          assert!(t.calories >= CALORIE_FLOOR_BMR * t.bmr - 1e-9, "{:?} {:?}", goal, day);
          assert!(t.calories <= CALORIE_CEILING_BMR * t.bmr + 1e-9, "{:?} {:?}", goal, day);
          assert!(t.carb_g >= 0);
        }
      }
    }
  }

  #[test]
  fn test_floor_clamp_overrides_deficit() {
    // Definition on a rest day: 1.55 * 0.8 * 0.95 = 1.178 > 1.05, so not clamped
    let metrics = reference_male();
    let t = DailyTargets::compute(&metrics, Goal::Definition, DayType::RestDay);
    assert!((t.calories - t.bmr * 1.178).abs() < 1e-6);
  }

  #[test]
  fn test_carbs_floor_at_zero() {
    // Very heavy, very lean, small measured BMR: protein + fat exceed the calorie target
    let metrics = UserMetrics {
      weight_kg: 200.0,
      height_cm: 190.0,
      age_years: 30,
      sex: Sex::Male,
      body_fat_pct: 5.0,
      resting_metabolic_rate_kcal: 800.0,
    };

    let t = DailyTargets::compute(&metrics, Goal::Volume, DayType::RestDay);
    assert!(t.protein_g as f64 * 4.0 + t.fat_g as f64 * 9.0 > t.calories);
    assert_eq!(t.carb_g, 0);
  }

  #[test]
  fn test_targets_are_deterministic() {
    let metrics = reference_male();
    let a = compute_daily_targets(&metrics, Goal::Volume, DayType::OlympicLiftDay);
    let b = compute_daily_targets(&metrics, Goal::Volume, DayType::OlympicLiftDay);
    assert_eq!(a, b);
  }

  #[test]
  fn test_goal_and_day_type_parsing() {
    assert_eq!("Volume".parse::<Goal>().unwrap(), Goal::Volume);
    assert_eq!("cut".parse::<Goal>().unwrap(), Goal::Definition);
    assert!("maintain".parse::<Goal>().is_err());

    assert_eq!("rest".parse::<DayType>().unwrap(), DayType::RestDay);
    assert_eq!("high-intensity-day".parse::<DayType>().unwrap(), DayType::HighIntensityDay);
    assert!("swim".parse::<DayType>().is_err());

    for day in DayType::ALL {
      assert_eq!(day.to_string().parse::<DayType>().unwrap(), day);
    }
  }

  #[test]
  fn test_carb_priority_table() {
    assert_eq!(DayType::HighIntensityDay.carb_priority(), 1.15);
    assert_eq!(DayType::OlympicLiftDay.carb_priority(), 1.15);
    assert_eq!(DayType::RestDay.carb_priority(), 0.90);
    assert_eq!(DayType::GymDay.carb_priority(), 1.0);
  }
}
