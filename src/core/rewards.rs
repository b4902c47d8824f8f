use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::core::{streak, summary};
use crate::db::Database;
use crate::models::config::Config;
use crate::models::reward::{Reward, UserProgress};
use crate::models::streak::{GoalStreak, GoalType};
use crate::models::summary::DailySummary;

/// Points for each goal met on a day, awarded at most once per goal per day.
pub const GOAL_POINTS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unlock {
    FirstFood,
    LoggingStreak(u32),
    StepsInDay(i64),
    WaterStreak(u32),
    CalorieStreak(u32),
    TotalPoints(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardDef {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub points: u64,
    pub unlock: Unlock,
}

impl RewardDef {
    pub fn to_reward(&self) -> Reward {
        Reward::new(self.key, self.title, self.description, self.points)
    }
}

pub const CATALOGUE: &[RewardDef] = &[
    RewardDef {
        key: "first_food",
        title: "First Bite",
        description: "Log your first food",
        points: 10,
        unlock: Unlock::FirstFood,
    },
    RewardDef {
        key: "logging_streak_3",
        title: "Warming Up",
        description: "Log food 3 days in a row",
        points: 25,
        unlock: Unlock::LoggingStreak(3),
    },
    RewardDef {
        key: "logging_streak_7",
        title: "Week Warrior",
        description: "Log food 7 days in a row",
        points: 50,
        unlock: Unlock::LoggingStreak(7),
    },
    RewardDef {
        key: "logging_streak_30",
        title: "Habit Master",
        description: "Log food 30 days in a row",
        points: 200,
        unlock: Unlock::LoggingStreak(30),
    },
    RewardDef {
        key: "steps_10k",
        title: "10K Club",
        description: "Walk 10,000 steps in a day",
        points: 30,
        unlock: Unlock::StepsInDay(10_000),
    },
    RewardDef {
        key: "hydration_hero",
        title: "Hydration Hero",
        description: "Hit the water goal 7 days in a row",
        points: 50,
        unlock: Unlock::WaterStreak(7),
    },
    RewardDef {
        key: "calorie_week",
        title: "On Target",
        description: "Stay within the calorie goal 7 days in a row",
        points: 75,
        unlock: Unlock::CalorieStreak(7),
    },
    RewardDef {
        key: "century",
        title: "Century",
        description: "Earn 100 points",
        points: 20,
        unlock: Unlock::TotalPoints(100),
    },
];

/// What the unlock rules look at.
pub struct UnlockContext<'a> {
    pub progress: &'a UserProgress,
    pub streaks: &'a [GoalStreak],
    pub summary: &'a DailySummary,
    pub total_food_entries: u64,
}

impl UnlockContext<'_> {
    fn streak(&self, goal_type: GoalType) -> u32 {
        self.streaks
            .iter()
            .find(|s| s.goal_type == goal_type)
            .map(|s| s.current_streak)
            .unwrap_or(0)
    }
}

/// Rewards newly earned in `ctx`, skipping ones already unlocked.
pub fn check_unlocks(ctx: &UnlockContext<'_>) -> Vec<&'static RewardDef> {
    CATALOGUE
        .iter()
        .filter(|def| !ctx.progress.has_reward(def.key))
        .filter(|def| match def.unlock {
            Unlock::FirstFood => ctx.total_food_entries > 0,
            Unlock::LoggingStreak(n) => ctx.streak(GoalType::Logging) >= n,
            Unlock::StepsInDay(n) => ctx.summary.steps >= n,
            Unlock::WaterStreak(n) => ctx.streak(GoalType::Water) >= n,
            Unlock::CalorieStreak(n) => ctx.streak(GoalType::Calories) >= n,
            Unlock::TotalPoints(n) => ctx.progress.total_points >= n,
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct RewardUpdate {
    pub points_awarded: u64,
    pub new_rewards: Vec<Reward>,
    pub progress: UserProgress,
}

/// Award goal points for `date` and append any newly unlocked rewards.
/// Points for a goal whose day was taken back are returned.
///
/// Unlocking runs until nothing new unlocks, since reward points can
/// themselves cross a points threshold.
pub fn apply(db: &Database, config: &Config, date: NaiveDate) -> Result<RewardUpdate> {
    let streaks = db.list_streaks()?;
    let day_summary = summary::load_or_new(db, config, date)?;
    let total_food_entries = db.count_foods()?;

    let mut points_awarded = 0;
    for s in &streaks {
        let reason = format!("goal:{}", s.goal_type);
        match s.last_achieved_date {
            Some(last) if last == date => {
                if db.award_once(date, &reason, GOAL_POINTS)? {
                    points_awarded += GOAL_POINTS;
                }
            }
            Some(last) if last > date => {}
            _ => {
                if db.revoke_award(date, &reason)? {
                    tracing::info!(goal = %s.goal_type, %date, "goal points taken back");
                }
            }
        }
    }

    let streaks: Vec<GoalStreak> = streaks.iter().map(|s| streak::as_of(s, date)).collect();
    let mut new_rewards = Vec::new();
    for _ in 0..CATALOGUE.len() {
        let progress = db.get_progress()?;
        let unlocked = check_unlocks(&UnlockContext {
            progress: &progress,
            streaks: &streaks,
            summary: &day_summary,
            total_food_entries,
        });
        if unlocked.is_empty() {
            break;
        }
        for def in unlocked {
            let reward = def.to_reward();
            if db.insert_reward(&reward)? {
                db.add_points(reward.points)?;
                points_awarded += reward.points;
                tracing::info!(reward = def.key, points = def.points, "reward unlocked");
                new_rewards.push(reward);
            }
        }
    }

    Ok(RewardUpdate {
        points_awarded,
        new_rewards,
        progress: db.get_progress()?,
    })
}
