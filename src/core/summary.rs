use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::db::{Database, SharedDb};
use crate::models::config::Config;
use crate::models::health::{SampleKind, TimeRange};
use crate::models::summary::DailySummary;

/// Source of stored daily summaries for the aggregation service.
#[async_trait]
pub trait SummaryStore: Send + Sync {
    /// Stored summaries for `from..=to`, oldest first. Missing days are absent.
    async fn fetch_summaries(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DailySummary>>;
}

pub struct SqliteSummaryStore {
    db: SharedDb,
}

impl SqliteSummaryStore {
    pub fn new(db: SharedDb) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SummaryStore for SqliteSummaryStore {
    async fn fetch_summaries(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DailySummary>> {
        let db = self
            .db
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))?;
        db.summaries_in_range(from, to)
    }
}

/// The stored summary for `date`, or a zeroed one carrying the current goals.
/// Goals are refreshed from config so the day being edited tracks goal changes.
pub fn load_or_new(db: &Database, config: &Config, date: NaiveDate) -> Result<DailySummary> {
    let mut s = db
        .get_summary(date)?
        .unwrap_or_else(|| DailySummary::zeroed(date, &config.goals));
    s.calories_goal = config.goals.calories;
    s.steps_goal = config.goals.steps;
    s.water_glasses_goal = config.goals.water_glasses;
    Ok(s)
}

/// Recompute consumed calories for `date` from its food entries.
pub fn record_food(db: &Database, config: &Config, date: NaiveDate) -> Result<DailySummary> {
    let mut s = load_or_new(db, config, date)?;
    s.calories_consumed = consumed_calories(db, date)?;
    db.upsert_summary(&s)?;
    Ok(s)
}

/// Add (or with a negative count, remove) glasses of water. Never below zero.
pub fn add_water(
    db: &Database,
    config: &Config,
    date: NaiveDate,
    glasses: i64,
) -> Result<DailySummary> {
    let mut s = load_or_new(db, config, date)?;
    s.water_glasses = match s.water_glasses.checked_add(glasses) {
        Some(total) => total.max(0),
        None => anyhow::bail!("water total out of range"),
    };
    db.upsert_summary(&s)?;
    Ok(s)
}

/// Recompute steps and burned calories for `date` from logged activity.
pub fn record_activity(db: &Database, config: &Config, date: NaiveDate) -> Result<DailySummary> {
    let mut s = load_or_new(db, config, date)?;
    let (steps, burned) = activity_totals(db, date)?;
    s.steps = steps;
    s.calories_burned = burned;
    db.upsert_summary(&s)?;
    Ok(s)
}

/// Re-derive every computed field of `date` from the raw entries. Water is
/// kept since it is only ever recorded on the summary itself.
pub fn rebuild(db: &Database, config: &Config, date: NaiveDate) -> Result<DailySummary> {
    let mut s = load_or_new(db, config, date)?;
    s.calories_consumed = consumed_calories(db, date)?;
    let (steps, burned) = activity_totals(db, date)?;
    s.steps = steps;
    s.calories_burned = burned;
    db.upsert_summary(&s)?;
    Ok(s)
}

fn consumed_calories(db: &Database, date: NaiveDate) -> Result<i64> {
    let total: f64 = db.foods_by_date(date)?.iter().map(|f| f.calories).sum();
    Ok(total.round() as i64)
}

fn activity_totals(db: &Database, date: NaiveDate) -> Result<(i64, i64)> {
    let range = TimeRange::for_day(date);
    let steps: f64 = db
        .samples_in_range(SampleKind::Steps, &range)?
        .iter()
        .map(|s| s.value)
        .sum();
    let burned: f64 = db
        .samples_in_range(SampleKind::CaloriesBurned, &range)?
        .iter()
        .map(|s| s.value)
        .sum();
    Ok((steps.round() as i64, burned.round() as i64))
}
