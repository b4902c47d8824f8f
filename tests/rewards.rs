mod common;

use chrono::Duration;
use calorievita::core::logging::{FoodInput, log_activity, log_food};
use calorievita::core::rewards::{self, GOAL_POINTS};
use calorievita::core::streak::evaluate_day;
use calorievita::db::Database;
use calorievita::models::config::Config;
use calorievita::models::health::SampleKind;
use calorievita::models::reward::Level;

fn log_and_check(db: &Database, config: &Config, day: chrono::NaiveDate) -> rewards::RewardUpdate {
    let input = FoodInput {
        date: Some(day),
        ..FoodInput::new("porridge", 300.0)
    };
    log_food(db, config, &input).unwrap();
    evaluate_day(db, config, day).unwrap();
    rewards::apply(db, config, day).unwrap()
}

#[test]
fn test_first_food_unlocks_once() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let day = common::date(2025, 6, 1);

    let update = log_and_check(&db, &config, day);
    let keys: Vec<_> = update.new_rewards.iter().map(|r| r.key.as_str()).collect();
    assert!(keys.contains(&"first_food"));

    let update = log_and_check(&db, &config, day);
    assert!(update.new_rewards.is_empty());
    assert_eq!(update.points_awarded, 0);
}

#[test]
fn test_goal_points_awarded_once_per_day() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let day = common::date(2025, 6, 1);

    let first = log_and_check(&db, &config, day);
    // logging + calories goals met, plus the first-food reward
    assert_eq!(first.points_awarded, 2 * GOAL_POINTS + 10);
    assert_eq!(first.progress.total_points, 2 * GOAL_POINTS + 10);

    let again = rewards::apply(&db, &config, day).unwrap();
    assert_eq!(again.points_awarded, 0);
    assert_eq!(again.progress.total_points, first.progress.total_points);
}

#[test]
fn test_goal_points_returned_when_day_is_taken_back() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let day = common::date(2025, 6, 1);

    let first = log_and_check(&db, &config, day);
    assert_eq!(first.progress.total_points, 2 * GOAL_POINTS + 10);

    let feast = FoodInput {
        date: Some(day),
        ..FoodInput::new("feast", 2500.0)
    };
    log_food(&db, &config, &feast).unwrap();
    evaluate_day(&db, &config, day).unwrap();
    let after = rewards::apply(&db, &config, day).unwrap();
    assert_eq!(after.points_awarded, 0);
    assert_eq!(after.progress.total_points, GOAL_POINTS + 10);

    let again = rewards::apply(&db, &config, day).unwrap();
    assert_eq!(again.progress.total_points, GOAL_POINTS + 10);
}

#[test]
fn test_logging_streak_rewards() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let start = common::date(2025, 6, 1);

    let mut unlocked = Vec::new();
    for i in 0..3 {
        let update = log_and_check(&db, &config, start + Duration::days(i));
        unlocked.extend(update.new_rewards.into_iter().map(|r| r.key));
    }
    assert!(unlocked.contains(&"logging_streak_3".to_string()));
    assert!(!unlocked.contains(&"logging_streak_7".to_string()));
    assert!(db.has_reward("logging_streak_3").unwrap());
}

#[test]
fn test_steps_reward_and_level_up() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let day = common::date(2025, 6, 1);

    log_activity(&db, &config, SampleKind::Steps, 10_500.0, Some(day)).unwrap();
    let update = log_and_check(&db, &config, day);
    assert!(update.new_rewards.iter().any(|r| r.key == "steps_10k"));

    // three goals (logging, calories, steps) plus first_food and steps_10k
    assert_eq!(update.progress.total_points, 3 * GOAL_POINTS + 10 + 30);
    assert_eq!(update.progress.level, Level::Beginner);

    let progress = db.get_progress().unwrap();
    assert_eq!(progress.unlocked_rewards.len(), 2);
}

#[test]
fn test_points_threshold_reward_chains() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    db.add_points(95).unwrap();

    let update = log_and_check(&db, &config, common::date(2025, 6, 1));
    let keys: Vec<_> = update.new_rewards.iter().map(|r| r.key.as_str()).collect();
    assert!(keys.contains(&"century"));
    assert_eq!(update.progress.level, Level::Novice);
}
