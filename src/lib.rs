pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod planner;
pub mod portions;
pub mod profile;
pub mod targets;

#[cfg(test)]
mod test_utils;

pub use error::PlanError;
pub use models::{HistoryEntry, ReferenceSnapshot, Sex, UserMetrics, UserProfile};
pub use portions::{scale_template, MealTemplate, ScaledPortion};
pub use targets::{compute_bmr, compute_daily_targets, compute_lean_mass, DailyTargets, DayType, Goal};

use clap::Parser;

pub fn run() {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let args = cli::Cli::parse();
  cli::init_tracing(args.verbose);

  let runtime = match tokio::runtime::Runtime::new() {
    Ok(rt) => rt,
    Err(e) => {
      eprintln!("Failed to start async runtime: {}", e);
      std::process::exit(1);
    }
  };

  if let Err(e) = runtime.block_on(cli::execute(args)) {
    tracing::error!(error = %e, "Command failed");
    eprintln!("{}", e);
    std::process::exit(1);
  }
}
