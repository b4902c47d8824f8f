use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    Calories,
    Steps,
    Water,
    Exercise,
    Logging,
}

impl GoalType {
    pub const ALL: [GoalType; 5] = [
        Self::Calories,
        Self::Steps,
        Self::Water,
        Self::Exercise,
        Self::Logging,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Calories => "Calorie goal",
            Self::Steps => "Step goal",
            Self::Water => "Hydration",
            Self::Exercise => "Exercise",
            Self::Logging => "Food logging",
        }
    }
}

impl std::fmt::Display for GoalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Calories => write!(f, "calories"),
            Self::Steps => write!(f, "steps"),
            Self::Water => write!(f, "water"),
            Self::Exercise => write!(f, "exercise"),
            Self::Logging => write!(f, "logging"),
        }
    }
}

impl FromStr for GoalType {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "calories" => Ok(Self::Calories),
            "steps" => Ok(Self::Steps),
            "water" => Ok(Self::Water),
            "exercise" => Ok(Self::Exercise),
            "logging" => Ok(Self::Logging),
            _ => anyhow::bail!(
                "invalid goal type: {} (expected calories/steps/water/exercise/logging)",
                s
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalStreak {
    pub goal_type: GoalType,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_achieved_date: Option<NaiveDate>,
    pub achieved_today: bool,
    /// `longest_streak` as it stood when the current run began.
    #[serde(skip)]
    pub longest_before_run: u32,
}

impl GoalStreak {
    pub fn new(goal_type: GoalType) -> Self {
        Self {
            goal_type,
            current_streak: 0,
            longest_streak: 0,
            last_achieved_date: None,
            achieved_today: false,
            longest_before_run: 0,
        }
    }
}
