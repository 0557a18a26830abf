use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::targets::Goal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
  Male,
  Female,
}

impl std::fmt::Display for Sex {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Male => write!(f, "male"),
      Self::Female => write!(f, "female"),
    }
  }
}

impl std::str::FromStr for Sex {
  type Err = PlanError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "male" | "m" => Ok(Self::Male),
      "female" | "f" => Ok(Self::Female),
      _ => Err(PlanError::Parse(format!("Unknown sex: {}", s))),
    }
  }
}

/// Current body metrics, overwritten wholesale on every save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMetrics {
  pub weight_kg: f64,
  pub height_cm: f64,
  pub age_years: i64,
  pub sex: Sex,
  pub body_fat_pct: f64,
  /// 0 means "not measured", BMR is then derived from the formula
  pub resting_metabolic_rate_kcal: f64,
}

impl Default for UserMetrics {
  fn default() -> Self {
    Self {
      weight_kg: 92.1,
      height_cm: 186.0,
      age_years: 42,
      sex: Sex::Male,
      body_fat_pct: 37.9,
      resting_metabolic_rate_kcal: 1721.0,
    }
  }
}

impl UserMetrics {
  /// Reject values the engine would silently turn into nonsense.
  /// The engine itself never validates; callers run this before saving.
  pub fn validate(&self) -> Result<(), PlanError> {
    if !(self.weight_kg > 0.0) {
      return Err(PlanError::InvalidMetrics(format!(
        "weight_kg must be positive, got {}",
        self.weight_kg
      )));
    }
    if !(self.height_cm > 0.0) {
      return Err(PlanError::InvalidMetrics(format!(
        "height_cm must be positive, got {}",
        self.height_cm
      )));
    }
    if self.age_years <= 0 {
      return Err(PlanError::InvalidMetrics(format!(
        "age_years must be positive, got {}",
        self.age_years
      )));
    }
    if !(0.0..100.0).contains(&self.body_fat_pct) {
      return Err(PlanError::InvalidMetrics(format!(
        "body_fat_pct must be in [0, 100), got {}",
        self.body_fat_pct
      )));
    }
    if !(self.resting_metabolic_rate_kcal >= 0.0) {
      return Err(PlanError::InvalidMetrics(format!(
        "resting_metabolic_rate_kcal must not be negative, got {}",
        self.resting_metabolic_rate_kcal
      )));
    }
    Ok(())
  }
}

/// Scaling baseline. Only replaced by an explicit reference reset,
/// never as a side effect of saving metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSnapshot {
  pub weight_kg: f64,
  pub body_fat_pct: f64,
}

impl Default for ReferenceSnapshot {
  fn default() -> Self {
    Self::from_metrics(&UserMetrics::default())
  }
}

impl ReferenceSnapshot {
  pub fn from_metrics(metrics: &UserMetrics) -> Self {
    Self {
      weight_kg: metrics.weight_kg,
      body_fat_pct: metrics.body_fat_pct,
    }
  }

  pub fn lean_mass_kg(&self) -> f64 {
    self.weight_kg * (1.0 - self.body_fat_pct / 100.0)
  }
}

/// Everything the caller persists for the single user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
  pub metrics: UserMetrics,
  pub goal: Goal,
  pub reference: ReferenceSnapshot,
  pub reference_set_at: Option<DateTime<Utc>>,
  pub updated_at: Option<DateTime<Utc>>,
}

impl Default for UserProfile {
  fn default() -> Self {
    Self {
      metrics: UserMetrics::default(),
      goal: Goal::Recomposition,
      reference: ReferenceSnapshot::default(),
      reference_set_at: None,
      updated_at: None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_metrics_are_valid() {
    assert!(UserMetrics::default().validate().is_ok());
  }

  #[test]
  fn test_validate_rejects_out_of_range() {
    let base = UserMetrics::default();

    let bad_weight = UserMetrics { weight_kg: 0.0, ..base.clone() };
    assert!(matches!(bad_weight.validate(), Err(PlanError::InvalidMetrics(_))));

    let bad_height = UserMetrics { height_cm: -170.0, ..base.clone() };
    assert!(bad_height.validate().is_err());

    let bad_age = UserMetrics { age_years: 0, ..base.clone() };
    assert!(bad_age.validate().is_err());

    let bad_fat = UserMetrics { body_fat_pct: 100.0, ..base.clone() };
    assert!(bad_fat.validate().is_err());

    let negative_fat = UserMetrics { body_fat_pct: -1.0, ..base.clone() };
    assert!(negative_fat.validate().is_err());

    let bad_rmr = UserMetrics { resting_metabolic_rate_kcal: -5.0, ..base.clone() };
    assert!(bad_rmr.validate().is_err());

    let nan_weight = UserMetrics { weight_kg: f64::NAN, ..base };
    assert!(nan_weight.validate().is_err());
  }

  #[test]
  fn test_zero_body_fat_is_valid() {
    let lean = UserMetrics { body_fat_pct: 0.0, ..UserMetrics::default() };
    assert!(lean.validate().is_ok());
  }

  #[test]
  fn test_reference_from_metrics() {
    let metrics = UserMetrics { weight_kg: 80.0, body_fat_pct: 20.0, ..UserMetrics::default() };
    let reference = ReferenceSnapshot::from_metrics(&metrics);

    assert_eq!(reference.weight_kg, 80.0);
    assert_eq!(reference.body_fat_pct, 20.0);
    assert!((reference.lean_mass_kg() - 64.0).abs() < 1e-9);
  }

  #[test]
  fn test_sex_parse_roundtrip() {
    assert_eq!("Male".parse::<Sex>().unwrap(), Sex::Male);
    assert_eq!("f".parse::<Sex>().unwrap(), Sex::Female);
    assert_eq!(Sex::Female.to_string(), "female");
    assert!("other".parse::<Sex>().is_err());
  }
}
