use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::config::Goals;

/// Kilocalories per gram of carbohydrate, protein and fat.
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Per-day rollup of consumption and activity. Cached independently of the
/// food entries it was built from, so the two can drift until rebuilt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub calories_consumed: i64,
    pub calories_burned: i64,
    pub calories_goal: i64,
    pub steps: i64,
    pub steps_goal: i64,
    pub water_glasses: i64,
    pub water_glasses_goal: i64,
}

impl DailySummary {
    /// Placeholder with no recorded activity, used when a source has nothing
    /// (or fails) for a date.
    pub fn zeroed(date: NaiveDate, goals: &Goals) -> Self {
        Self {
            date,
            calories_consumed: 0,
            calories_burned: 0,
            calories_goal: goals.calories,
            steps: 0,
            steps_goal: goals.steps,
            water_glasses: 0,
            water_glasses_goal: goals.water_glasses,
        }
    }

    pub fn net_calories(&self) -> i64 {
        self.calories_consumed.saturating_sub(self.calories_burned)
    }

    /// Calories left before hitting the goal; negative once over.
    pub fn calories_remaining(&self) -> i64 {
        self.calories_goal.saturating_sub(self.calories_consumed)
    }

    pub fn calorie_progress(&self) -> f64 {
        ratio(self.calories_consumed, self.calories_goal)
    }

    pub fn steps_progress(&self) -> f64 {
        ratio(self.steps, self.steps_goal)
    }

    pub fn water_progress(&self) -> f64 {
        ratio(self.water_glasses, self.water_glasses_goal)
    }

    pub fn is_empty(&self) -> bool {
        self.calories_consumed == 0
            && self.calories_burned == 0
            && self.steps == 0
            && self.water_glasses == 0
    }
}

fn ratio(value: i64, goal: i64) -> f64 {
    if goal <= 0 {
        return 0.0;
    }
    (value as f64 / goal as f64).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MacroBreakdown {
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct MacroPercentages {
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

impl MacroBreakdown {
    pub fn total_grams(&self) -> f64 {
        self.carbs + self.protein + self.fat
    }

    /// Share of macro calories contributed by carbs, protein and fat, as
    /// whole-number percentages rounded to one decimal.
    pub fn percentages(&self) -> MacroPercentages {
        let carbs = self.carbs * KCAL_PER_G_CARBS;
        let protein = self.protein * KCAL_PER_G_PROTEIN;
        let fat = self.fat * KCAL_PER_G_FAT;
        let total = carbs + protein + fat;
        if total <= 0.0 {
            return MacroPercentages::default();
        }
        MacroPercentages {
            carbs: round1(carbs / total * 100.0),
            protein: round1(protein / total * 100.0),
            fat: round1(fat / total * 100.0),
        }
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
