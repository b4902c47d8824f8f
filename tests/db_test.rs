mod common;

use calorievita::models::health::{SampleKind, TimeRange};
use calorievita::models::reward::{Level, Reward};
use calorievita::models::streak::{GoalStreak, GoalType};

#[test]
fn test_foods_grouped_by_local_day() {
    let (_dir, db) = common::setup_db();
    let d1 = common::date(2025, 3, 1);
    let d2 = common::date(2025, 3, 2);
    db.insert_food(&common::make_food("oatmeal", 350.0, d1)).unwrap();
    db.insert_food(&common::make_food("apple", 95.0, d1)).unwrap();
    db.insert_food(&common::make_food("pizza", 800.0, d2)).unwrap();

    assert_eq!(db.foods_by_date(d1).unwrap().len(), 2);
    assert_eq!(db.foods_by_date(d2).unwrap().len(), 1);
    assert_eq!(db.foods_in_range(d1, d2).unwrap().len(), 3);
    assert_eq!(db.count_foods().unwrap(), 3);
    assert_eq!(db.distinct_food_dates(d1, d2).unwrap(), vec![d2, d1]);
}

#[test]
fn test_food_roundtrip_and_delete() {
    let (_dir, db) = common::setup_db();
    let mut f = common::make_food("greek yogurt", 150.0, common::date(2025, 3, 1));
    f.protein = 15.0;
    f.serving = Some("1 cup".into());
    db.insert_food(&f).unwrap();

    let stored = db.get_food(&f.id).unwrap().unwrap();
    assert_eq!(stored, f);

    assert!(db.delete_food(&f.id).unwrap());
    assert!(!db.delete_food(&f.id).unwrap());
    assert!(db.get_food(&f.id).unwrap().is_none());
}

#[test]
fn test_summary_upsert_replaces_row() {
    let (_dir, db) = common::setup_db();
    let d = common::date(2025, 3, 1);
    db.upsert_summary(&common::make_summary(d, 1200, 0, 0)).unwrap();
    db.upsert_summary(&common::make_summary(d, 1800, 200, 5000)).unwrap();

    let s = db.get_summary(d).unwrap().unwrap();
    assert_eq!(s.calories_consumed, 1800);
    assert_eq!(s.steps, 5000);
    assert_eq!(db.summaries_in_range(d, d).unwrap().len(), 1);
}

#[test]
fn test_summaries_in_range_ascending() {
    let (_dir, db) = common::setup_db();
    for day in [5, 1, 3] {
        db.upsert_summary(&common::make_summary(common::date(2025, 3, day), 100, 0, 0))
            .unwrap();
    }
    let rows = db
        .summaries_in_range(common::date(2025, 3, 1), common::date(2025, 3, 4))
        .unwrap();
    let dates: Vec<_> = rows.iter().map(|s| s.date).collect();
    assert_eq!(dates, vec![common::date(2025, 3, 1), common::date(2025, 3, 3)]);
}

#[test]
fn test_samples_filtered_by_kind_and_day() {
    let (_dir, db) = common::setup_db();
    let d = common::date(2025, 3, 1);
    db.insert_sample(&common::make_sample(SampleKind::Steps, 4000.0, d)).unwrap();
    db.insert_sample(&common::make_sample(SampleKind::Steps, 3000.0, d)).unwrap();
    db.insert_sample(&common::make_sample(SampleKind::Weight, 80.0, d)).unwrap();
    db.insert_sample(&common::make_sample(
        SampleKind::Steps,
        9999.0,
        common::date(2025, 3, 2),
    ))
    .unwrap();

    let steps = db
        .samples_in_range(SampleKind::Steps, &TimeRange::for_day(d))
        .unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps.iter().map(|s| s.value).sum::<f64>(), 7000.0);
}

#[test]
fn test_missing_streak_starts_fresh() {
    let (_dir, db) = common::setup_db();
    let s = db.get_streak(GoalType::Water).unwrap();
    assert_eq!(s, GoalStreak::new(GoalType::Water));

    let mut updated = s.clone();
    updated.current_streak = 4;
    updated.longest_streak = 6;
    updated.longest_before_run = 6;
    updated.last_achieved_date = Some(common::date(2025, 3, 1));
    db.upsert_streak(&updated).unwrap();
    assert_eq!(db.get_streak(GoalType::Water).unwrap(), updated);
    assert_eq!(db.list_streaks().unwrap().len(), GoalType::ALL.len());
}

#[test]
fn test_rewards_are_unique_by_key() {
    let (_dir, db) = common::setup_db();
    let r = Reward::new("first_food", "First Bite", "Log your first food", 10);
    assert!(db.insert_reward(&r).unwrap());
    let again = Reward::new("first_food", "First Bite", "Log your first food", 10);
    assert!(!db.insert_reward(&again).unwrap());
    assert!(db.has_reward("first_food").unwrap());
    assert_eq!(db.list_rewards().unwrap().len(), 1);
}

#[test]
fn test_award_once_per_day_and_reason() {
    let (_dir, db) = common::setup_db();
    let d = common::date(2025, 3, 1);
    assert!(db.award_once(d, "goal:water", 10).unwrap());
    assert!(!db.award_once(d, "goal:water", 10).unwrap());
    assert!(db.award_once(d, "goal:steps", 10).unwrap());
    assert_eq!(db.total_points().unwrap(), 20);

    let progress = db.get_progress().unwrap();
    assert_eq!(progress.total_points, 20);
    assert_eq!(progress.level, Level::Beginner);
}

#[test]
fn test_revoke_award_returns_points_once() {
    let (_dir, db) = common::setup_db();
    let d = common::date(2025, 3, 1);
    db.award_once(d, "goal:water", 10).unwrap();
    db.award_once(d, "goal:steps", 10).unwrap();

    assert!(db.revoke_award(d, "goal:water").unwrap());
    assert!(!db.revoke_award(d, "goal:water").unwrap());
    assert!(!db.revoke_award(d, "goal:calories").unwrap());
    assert_eq!(db.total_points().unwrap(), 10);

    // can be earned again after being taken back
    assert!(db.award_once(d, "goal:water", 10).unwrap());
    assert_eq!(db.total_points().unwrap(), 20);
}
