//! Command line front end. Every command prints its result as JSON on stdout;
//! logs go to stderr.

use chrono::{NaiveDate, Weekday};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{plan, profile};
use crate::config::{AppConfig, DATABASE_URL_VAR};
use crate::db::{initialize_db, AppState};
use crate::error::PlanError;
use crate::models::{Sex, UserMetrics};
use crate::targets::{DayType, Goal};

#[derive(Parser)]
#[command(name = "nutrition-planner")]
#[command(about = "Daily calorie targets, macro split and scaled meal portions", long_about = None)]
#[command(version)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  #[arg(long, env = DATABASE_URL_VAR)]
  pub database_url: Option<String>,

  #[arg(short, long)]
  pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
  /// Show the stored profile
  Profile,
  /// Save current metrics (the scaling reference is not touched)
  Save {
    #[arg(long)]
    weight: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    #[arg(long)]
    age: Option<i64>,
    #[arg(long)]
    sex: Option<Sex>,
    #[arg(long)]
    body_fat: Option<f64>,
    /// Measured resting metabolic rate, 0 to derive it
    #[arg(long)]
    rmr: Option<f64>,
    #[arg(long)]
    goal: Option<Goal>,
  },
  /// Make the current metrics the new scaling reference
  SetReference,
  /// Change the goal
  Goal { goal: Goal },
  /// Daily calorie and macro targets
  Targets {
    #[command(flatten)]
    day: DaySelection,
  },
  /// Full meal plan with scaled portions
  Plan {
    #[command(flatten)]
    day: DaySelection,
  },
  /// Reference snapshot, body ratios and stale-reference check
  Diagnose,
  /// Body metrics log
  History {
    #[command(subcommand)]
    action: HistoryAction,
  },
}

#[derive(clap::Args)]
#[group(required = false, multiple = false)]
pub struct DaySelection {
  /// gym_day, high_intensity_day, olympic_lift_day or rest_day
  #[arg(long)]
  pub day_type: Option<DayType>,

  /// Use the training week schedule for this weekday
  #[arg(long)]
  pub weekday: Option<Weekday>,
}

impl DaySelection {
  /// None means "today's scheduled day"
  fn resolve(&self) -> Option<DayType> {
    self
      .day_type
      .or_else(|| self.weekday.map(crate::planner::scheduled_day_type))
  }
}

#[derive(Subcommand)]
pub enum HistoryAction {
  Add {
    #[arg(long)]
    weight: f64,
    #[arg(long)]
    body_fat: f64,
    /// Defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
  },
  List,
}

pub fn init_tracing(verbose: bool) {
  let log_level = if verbose { "debug" } else { "info" };
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("nutrition_planner_lib={}", log_level).into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();
}

fn print_json<T: Serialize>(value: &T) {
  println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Merge the flags given on the command line over the stored metrics
fn merge_metrics(
  current: &UserMetrics,
  weight: Option<f64>,
  height: Option<f64>,
  age: Option<i64>,
  sex: Option<Sex>,
  body_fat: Option<f64>,
  rmr: Option<f64>,
) -> UserMetrics {
  UserMetrics {
    weight_kg: weight.unwrap_or(current.weight_kg),
    height_cm: height.unwrap_or(current.height_cm),
    age_years: age.unwrap_or(current.age_years),
    sex: sex.unwrap_or(current.sex),
    body_fat_pct: body_fat.unwrap_or(current.body_fat_pct),
    resting_metabolic_rate_kcal: rmr.unwrap_or(current.resting_metabolic_rate_kcal),
  }
}

pub async fn execute(cli: Cli) -> Result<(), PlanError> {
  let mut config = AppConfig::from_env()?;
  if let Some(url) = cli.database_url {
    config = config.with_database_url(url);
  }

  let state = AppState {
    db: initialize_db(&config).await?,
  };

  match cli.command {
    Commands::Profile => print_json(&profile::get_profile(&state).await?),
    Commands::Save {
      weight,
      height,
      age,
      sex,
      body_fat,
      rmr,
      goal,
    } => {
      let current = profile::get_profile(&state).await?;
      let metrics = merge_metrics(&current.metrics, weight, height, age, sex, body_fat, rmr);
      print_json(&profile::save_metrics(&state, metrics, goal).await?);
    }
    Commands::SetReference => print_json(&profile::set_reference(&state).await?),
    Commands::Goal { goal } => print_json(&profile::set_goal(&state, goal).await?),
    Commands::Targets { day } => print_json(&plan::get_daily_targets(&state, day.resolve()).await?),
    Commands::Plan { day } => print_json(&plan::get_meal_plan(&state, day.resolve()).await?),
    Commands::Diagnose => print_json(&plan::get_diagnostics(&state).await?),
    Commands::History { action } => match action {
      HistoryAction::Add {
        weight,
        body_fat,
        date,
      } => print_json(&profile::add_history_entry(&state, weight, body_fat, date).await?),
      HistoryAction::List => print_json(&profile::get_history(&state).await?),
    },
  }

  state.db.close().await;
  Ok(())
}
