use anyhow::Result;
use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::core::summary;
use crate::db::Database;
use crate::models::config::{Config, Goals};
use crate::models::health::{SampleKind, TimeRange};
use crate::models::streak::{GoalStreak, GoalType};
use crate::models::summary::DailySummary;

/// Everything the goal thresholds look at for one day.
#[derive(Debug, Clone)]
pub struct DayRecord {
    pub summary: DailySummary,
    pub food_count: usize,
    pub workout_minutes: i64,
}

/// Eaten something, and no more than the goal.
pub fn calories_met(s: &DailySummary) -> bool {
    s.calories_consumed > 0 && s.calories_consumed <= s.calories_goal
}

pub fn steps_met(s: &DailySummary) -> bool {
    s.steps_goal > 0 && s.steps >= s.steps_goal
}

pub fn water_met(s: &DailySummary) -> bool {
    s.water_glasses_goal > 0 && s.water_glasses >= s.water_glasses_goal
}

pub fn goal_met(goal_type: GoalType, day: &DayRecord, goals: &Goals) -> bool {
    match goal_type {
        GoalType::Calories => calories_met(&day.summary),
        GoalType::Steps => steps_met(&day.summary),
        GoalType::Water => water_met(&day.summary),
        GoalType::Exercise => day.workout_minutes >= goals.exercise_minutes,
        GoalType::Logging => day.food_count > 0,
    }
}

/// Apply one day's outcome to a streak.
///
/// A gap of more than one day since the last achievement resets the count.
/// Achieving on a day not yet counted adds exactly one, so re-evaluating the
/// same day is idempotent. A day that was counted but no longer meets the goal
/// (e.g. more food pushed calories over) is taken back, and so is whatever it
/// added to the longest streak. Days older than the last achievement leave the
/// streak untouched.
pub fn advance(streak: &GoalStreak, date: NaiveDate, achieved: bool) -> GoalStreak {
    let mut s = streak.clone();

    if let Some(last) = s.last_achieved_date {
        if date < last {
            return s;
        }
        if date == last {
            if !achieved {
                s.current_streak = s.current_streak.saturating_sub(1);
                s.longest_streak = s.longest_before_run.max(s.current_streak);
                s.last_achieved_date = if s.current_streak > 0 {
                    date.pred_opt()
                } else {
                    None
                };
                s.achieved_today = false;
            } else {
                s.achieved_today = true;
            }
            return s;
        }
        if (date - last).num_days() > 1 {
            s.current_streak = 0;
        }
    }

    if achieved {
        if s.current_streak == 0 {
            s.longest_before_run = s.longest_streak;
        }
        s.current_streak += 1;
        s.last_achieved_date = Some(date);
    }
    s.achieved_today = achieved;
    s.longest_streak = s.longest_streak.max(s.current_streak);
    s
}

/// How a stored streak reads on `today` without recording anything: a streak
/// whose last achievement is older than yesterday is already broken. Viewed
/// from a day before its last achievement, the stored count stands.
pub fn as_of(streak: &GoalStreak, today: NaiveDate) -> GoalStreak {
    let mut s = streak.clone();
    match s.last_achieved_date {
        Some(last) if last == today => s.achieved_today = true,
        Some(last) if last > today => s.achieved_today = false,
        Some(last) if today.pred_opt() == Some(last) => s.achieved_today = false,
        _ => {
            s.current_streak = 0;
            s.achieved_today = false;
        }
    }
    s
}

pub fn day_record(db: &Database, config: &Config, date: NaiveDate) -> Result<DayRecord> {
    let summary = summary::load_or_new(db, config, date)?;
    let food_count = db.foods_by_date(date)?.len();
    let workout_minutes = db
        .samples_in_range(SampleKind::Workout, &TimeRange::for_day(date))?
        .iter()
        .map(|s| s.value.round() as i64)
        .sum();
    Ok(DayRecord {
        summary,
        food_count,
        workout_minutes,
    })
}

#[derive(Debug, Serialize)]
pub struct StreakUpdate {
    pub goal_type: GoalType,
    pub achieved: bool,
    pub streak: GoalStreak,
}

/// Evaluate every goal for `date` and persist the updated streaks.
pub fn evaluate_day(db: &Database, config: &Config, date: NaiveDate) -> Result<Vec<StreakUpdate>> {
    let day = day_record(db, config, date)?;
    let mut updates = Vec::new();
    for goal_type in GoalType::ALL {
        let achieved = goal_met(goal_type, &day, &config.goals);
        let before = db.get_streak(goal_type)?;
        let after = advance(&before, date, achieved);
        if after != before {
            db.upsert_streak(&after)?;
            tracing::debug!(
                goal = %goal_type,
                current = after.current_streak,
                longest = after.longest_streak,
                "streak updated"
            );
        }
        updates.push(StreakUpdate {
            goal_type,
            achieved,
            streak: after,
        });
    }
    Ok(updates)
}

/// Consecutive days with at least one food entry, ending at `today`.
pub fn logging_days(db: &Database, today: NaiveDate) -> Result<u32> {
    let from = today - Duration::days(365);
    let dates = db.distinct_food_dates(from, today)?;

    let mut streak = 0u32;
    let mut check_date = today;
    for d in dates {
        if d == check_date {
            streak += 1;
            check_date -= Duration::days(1);
        } else {
            break;
        }
    }
    Ok(streak)
}
