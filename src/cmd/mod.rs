pub mod activity;
pub mod config;
pub mod health;
pub mod init;
pub mod insights;
pub mod log;
pub mod rebuild;
pub mod rewards;
pub mod show;
pub mod status;
pub mod streaks;
pub mod summary;
pub mod water;

use std::time::Duration;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde_json::Value;

use calorievita::core::aggregation::AggregationService;
use calorievita::core::rewards::{self as reward_engine, RewardUpdate};
use calorievita::core::streak;
use calorievita::core::summary::SqliteSummaryStore;
use calorievita::db::{Database, SharedDb};
use calorievita::health::LocalHealthBridge;
use calorievita::models::config::{Config, MergePolicy};
use calorievita::output;

pub fn open() -> Result<(Config, Database)> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    Ok((config, db))
}

pub fn day(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

pub fn print_ok(command: &str, data: Value) -> Result<()> {
    let out = output::success(command, data);
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}

/// Re-evaluate streaks and rewards for a day after its data changed.
pub fn after_write(db: &Database, config: &Config, date: NaiveDate) -> Result<RewardUpdate> {
    streak::evaluate_day(db, config, date)?;
    reward_engine::apply(db, config, date)
}

pub fn print_new_rewards(update: &RewardUpdate) {
    for r in &update.new_rewards {
        println!("Reward unlocked: {} (+{} pts)", r.title, r.points);
    }
}

pub fn bridge_timeout(config: &Config) -> Duration {
    Duration::from_millis(config.health.timeout_ms)
}

pub fn aggregation_service(
    config: &Config,
    db: SharedDb,
) -> AggregationService<SqliteSummaryStore, LocalHealthBridge> {
    let policy = if config.health.enabled {
        config.health.merge_policy
    } else {
        MergePolicy::StoreOnly
    };
    AggregationService::new(
        SqliteSummaryStore::new(db.clone()),
        LocalHealthBridge::new(db),
        config.goals.clone(),
    )
    .with_policy(policy)
    .with_timeout(bridge_timeout(config))
}
