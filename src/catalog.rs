//! Static meal catalog
//!
//! Each meal slot owns a fixed share of the daily calories and an ordered
//! list of template options designed around the reference body.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::portions::MealTemplate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
  Breakfast,
  Lunch,
  Snack,
  Dinner,
}

impl MealSlot {
  /// Catalog (and display) order
  pub const ALL: [MealSlot; 4] = [
    MealSlot::Breakfast,
    MealSlot::Lunch,
    MealSlot::Snack,
    MealSlot::Dinner,
  ];

  /// Fraction of the daily calories, shares sum to 1.0
  pub fn calorie_share(&self) -> f64 {
    match self {
      MealSlot::Breakfast => 0.25,
      MealSlot::Lunch => 0.35,
      MealSlot::Snack => 0.15,
      MealSlot::Dinner => 0.25,
    }
  }

  pub fn templates(&self) -> &'static [MealTemplate] {
    match self {
      MealSlot::Breakfast => &BREAKFAST,
      MealSlot::Lunch => &LUNCH,
      MealSlot::Snack => &SNACK,
      MealSlot::Dinner => &DINNER,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      MealSlot::Breakfast => "breakfast",
      MealSlot::Lunch => "lunch",
      MealSlot::Snack => "snack",
      MealSlot::Dinner => "dinner",
    }
  }
}

impl std::fmt::Display for MealSlot {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for MealSlot {
  type Err = PlanError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "breakfast" => Ok(MealSlot::Breakfast),
      "lunch" => Ok(MealSlot::Lunch),
      "snack" => Ok(MealSlot::Snack),
      "dinner" => Ok(MealSlot::Dinner),
      _ => Err(PlanError::Parse(format!("Unknown meal slot: {}", s))),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Templates
/// ---------------------------------------------------------------------------

static BREAKFAST: [MealTemplate; 2] = [
  MealTemplate {
    description: "Oats 60 g + 2 egg whites + 1 whole egg + 1 fruit",
    base_calories: 520.0,
    base_protein_g: 28.0,
    base_carb_g: 65.0,
    base_fat_g: 9.0,
    raw_protein_food_g: Some(50.0),
    raw_carb_g: Some(60.0),
    cooked_carb_g: None,
    whole_egg_count: Some(1.0),
    egg_white_count: Some(2.0),
  },
  MealTemplate {
    description: "Wholegrain toast 80 g + 3 eggs + 1 fruit",
    base_calories: 560.0,
    base_protein_g: 30.0,
    base_carb_g: 60.0,
    base_fat_g: 15.0,
    raw_protein_food_g: Some(90.0),
    raw_carb_g: Some(80.0),
    cooked_carb_g: None,
    whole_egg_count: Some(3.0),
    egg_white_count: None,
  },
];

static LUNCH: [MealTemplate; 2] = [
  MealTemplate {
    description: "Chicken breast 160 g (raw) + rice 40 g raw (~120 g cooked)",
    base_calories: 620.0,
    base_protein_g: 45.0,
    base_carb_g: 80.0,
    base_fat_g: 8.0,
    raw_protein_food_g: Some(160.0),
    raw_carb_g: Some(40.0),
    cooked_carb_g: Some(120.0),
    whole_egg_count: None,
    egg_white_count: None,
  },
  MealTemplate {
    description: "Beef 150 g + potato 250 g raw",
    base_calories: 600.0,
    base_protein_g: 44.0,
    base_carb_g: 70.0,
    base_fat_g: 12.0,
    raw_protein_food_g: Some(150.0),
    raw_carb_g: Some(250.0),
    cooked_carb_g: Some(420.0),
    whole_egg_count: None,
    egg_white_count: None,
  },
];

static SNACK: [MealTemplate; 2] = [
  MealTemplate {
    description: "Greek yogurt 150 g + walnuts 25 g",
    base_calories: 300.0,
    base_protein_g: 18.0,
    base_carb_g: 12.0,
    base_fat_g: 15.0,
    raw_protein_food_g: Some(150.0),
    raw_carb_g: Some(25.0),
    cooked_carb_g: None,
    whole_egg_count: None,
    egg_white_count: None,
  },
  MealTemplate {
    description: "Protein shake 30 g + oats 40 g",
    base_calories: 360.0,
    base_protein_g: 30.0,
    base_carb_g: 40.0,
    base_fat_g: 6.0,
    raw_protein_food_g: Some(30.0),
    raw_carb_g: Some(40.0),
    cooked_carb_g: None,
    whole_egg_count: None,
    egg_white_count: None,
  },
];

static DINNER: [MealTemplate; 2] = [
  MealTemplate {
    description: "White fish 180 g + sweet potato 150 g raw (~180 g cooked)",
    base_calories: 520.0,
    base_protein_g: 42.0,
    base_carb_g: 45.0,
    base_fat_g: 8.0,
    raw_protein_food_g: Some(180.0),
    raw_carb_g: Some(150.0),
    cooked_carb_g: Some(180.0),
    whole_egg_count: None,
    egg_white_count: None,
  },
  MealTemplate {
    description: "Salmon 150 g + rice 33 g raw (~100 g cooked)",
    base_calories: 600.0,
    base_protein_g: 38.0,
    base_carb_g: 50.0,
    base_fat_g: 15.0,
    raw_protein_food_g: Some(150.0),
    raw_carb_g: Some(33.0),
    cooked_carb_g: Some(100.0),
    whole_egg_count: None,
    egg_white_count: None,
  },
];
