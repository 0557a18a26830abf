//! Portion Scaler
//!
//! Scales a fixed meal template to a meal calorie target and to the user's
//! current body relative to the reference snapshot. Three independent ratios
//! are multiplied:
//! - calorie fit: meal target / template calories
//! - weight fit: current weight / reference weight
//! - lean fit: current lean mass / reference lean mass
//!
//! The product is clamped to [0.30, 2.2] and applied to every quantity on
//! the template.

use serde::{Deserialize, Serialize};

use crate::models::{ReferenceSnapshot, UserMetrics};
use crate::targets::compute_lean_mass;

pub const MIN_SCALE: f64 = 0.30;
pub const MAX_SCALE: f64 = 2.2;

// ---------------------------------------------------------------------------
/// Meal Template: immutable catalog entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealTemplate {
    pub description: &'static str,
    pub base_calories: f64,
    pub base_protein_g: f64,
    pub base_carb_g: f64,
    pub base_fat_g: f64,
    /// Weight of the main protein food, raw
    pub raw_protein_food_g: Option<f64>,
    pub raw_carb_g: Option<f64>,
    pub cooked_carb_g: Option<f64>,
    pub whole_egg_count: Option<f64>,
    pub egg_white_count: Option<f64>,
}

// ---------------------------------------------------------------------------
/// Scaled Portion: template quantities after scaling
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledPortion {
    pub description: String,
    pub calories: i64,
    pub protein_g: i64,
    pub carb_g: i64,
    pub fat_g: i64,
    /// Absent on the template means absent here
    pub raw_protein_food_g: Option<i64>,
    pub raw_carb_g: Option<i64>,
    pub cooked_carb_g: Option<i64>,
    /// Egg counts are always present, zero when the template has none
    pub whole_egg_count: i64,
    pub egg_white_count: i64,
    pub factors: ScaleFactors,
}

/// The ratios behind a scale factor, rounded to 3 decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    pub kcal_ratio: f64,
    pub weight_ratio: f64,
    pub lean_ratio: f64,
    pub scale: f64,
}

impl ScaleFactors {
    /// Unrounded ratios and clamped scale
    pub fn compute(
        base_calories: f64,
        meal_calorie_target: f64,
        metrics: &UserMetrics,
        reference: &ReferenceSnapshot,
    ) -> Self {
        let kcal_ratio = neutral_ratio(meal_calorie_target, base_calories);
        let weight_ratio = neutral_ratio(metrics.weight_kg, reference.weight_kg);
        let lean_ratio = neutral_ratio(compute_lean_mass(metrics), reference.lean_mass_kg());

        let raw_scale = kcal_ratio * weight_ratio * lean_ratio;
        let scale = raw_scale.max(MIN_SCALE).min(MAX_SCALE);

        Self {
            kcal_ratio,
            weight_ratio,
            lean_ratio,
            scale,
        }
    }

    pub fn rounded(&self) -> Self {
        Self {
            kcal_ratio: round_to(self.kcal_ratio, 3),
            weight_ratio: round_to(self.weight_ratio, 3),
            lean_ratio: round_to(self.lean_ratio, 3),
            scale: round_to(self.scale, 3),
        }
    }
}

/// numerator / denominator, or 1.0 when the denominator is not positive
fn neutral_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        1.0
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn scale_quantity(value: f64, scale: f64) -> i64 {
    (value * scale).round() as i64
}

/// Scale one template for the given meal calorie target
pub fn scale_template(
    template: &MealTemplate,
    meal_calorie_target: f64,
    metrics: &UserMetrics,
    reference: &ReferenceSnapshot,
) -> ScaledPortion {
    let factors = ScaleFactors::compute(template.base_calories, meal_calorie_target, metrics, reference);
    let scale = factors.scale;
    let scale_optional = |v: Option<f64>| v.map(|g| scale_quantity(g, scale));

    ScaledPortion {
        description: template.description.to_string(),
        calories: scale_quantity(template.base_calories, scale),
        protein_g: scale_quantity(template.base_protein_g, scale),
        carb_g: scale_quantity(template.base_carb_g, scale),
        fat_g: scale_quantity(template.base_fat_g, scale),
        raw_protein_food_g: scale_optional(template.raw_protein_food_g),
        raw_carb_g: scale_optional(template.raw_carb_g),
        cooked_carb_g: scale_optional(template.cooked_carb_g),
        whole_egg_count: scale_optional(template.whole_egg_count).unwrap_or(0),
        egg_white_count: scale_optional(template.egg_white_count).unwrap_or(0),
        factors: factors.rounded(),
    }
}
