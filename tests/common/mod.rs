#![allow(dead_code)]

use chrono::NaiveDate;
use calorievita::db::Database;
use calorievita::models::config::Goals;
use calorievita::models::food::FoodEntry;
use calorievita::models::health::{HealthSample, SampleKind, local_noon};
use calorievita::models::summary::DailySummary;
use tempfile::TempDir;

/// Create a temporary database for testing.
pub fn setup_db() -> (TempDir, Database) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).unwrap();
    (dir, db)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Create a food entry on a specific date (local noon).
pub fn make_food(name: &str, calories: f64, date: NaiveDate) -> FoodEntry {
    let mut f = FoodEntry::new(name, calories);
    f.timestamp = local_noon(date);
    f
}

/// Create an activity sample on a specific date (local noon).
pub fn make_sample(kind: SampleKind, value: f64, date: NaiveDate) -> HealthSample {
    let mut s = HealthSample::new(kind, value);
    s.timestamp = local_noon(date);
    s
}

pub fn make_summary(date: NaiveDate, consumed: i64, burned: i64, steps: i64) -> DailySummary {
    let mut s = DailySummary::zeroed(date, &Goals::default());
    s.calories_consumed = consumed;
    s.calories_burned = burned;
    s.steps = steps;
    s
}
