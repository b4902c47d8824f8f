use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::core::analytics::{self, MealTotal};
use crate::core::{streak, summary};
use crate::db::Database;
use crate::models::config::Config;
use crate::models::reward::Level;
use crate::models::streak::GoalStreak;
use crate::models::summary::{DailySummary, MacroBreakdown, MacroPercentages};

#[derive(Serialize)]
pub struct StatusData {
    pub date: NaiveDate,
    pub summary: DailySummary,
    pub calories_remaining: i64,
    pub macros: MacroBreakdown,
    pub macro_percentages: MacroPercentages,
    pub meals: Vec<MealTotal>,
    pub streaks: Vec<GoalStreak>,
    pub logging_days: u32,
    pub progress: ProgressStatus,
}

#[derive(Debug, Serialize)]
pub struct ProgressStatus {
    pub total_points: u64,
    pub level: Level,
    pub points_to_next: Option<u64>,
    pub rewards_unlocked: usize,
}

/// Daily overview read purely from local data.
pub fn compute(db: &Database, config: &Config, date: NaiveDate) -> Result<StatusData> {
    let day_summary = summary::load_or_new(db, config, date)?;
    let foods = db.foods_by_date(date)?;
    let macros = analytics::macro_breakdown(&foods);

    let streaks = db
        .list_streaks()?
        .iter()
        .map(|s| streak::as_of(s, date))
        .collect();

    let progress = db.get_progress()?;

    Ok(StatusData {
        date,
        calories_remaining: day_summary.calories_remaining(),
        summary: day_summary,
        macro_percentages: macros.percentages(),
        macros,
        meals: analytics::meal_totals(&foods),
        streaks,
        logging_days: streak::logging_days(db, date)?,
        progress: ProgressStatus {
            total_points: progress.total_points,
            level: progress.level,
            points_to_next: Level::points_to_next(progress.total_points),
            rewards_unlocked: progress.unlocked_rewards.len(),
        },
    })
}
