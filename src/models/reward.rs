use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Progress levels, ordered by the points needed to reach them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Beginner,
    Novice,
    Intermediate,
    Advanced,
    Expert,
    Master,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Self::Beginner,
        Self::Novice,
        Self::Intermediate,
        Self::Advanced,
        Self::Expert,
        Self::Master,
    ];

    /// Minimum total points for this level.
    pub fn threshold(self) -> u64 {
        match self {
            Self::Beginner => 0,
            Self::Novice => 100,
            Self::Intermediate => 300,
            Self::Advanced => 600,
            Self::Expert => 1000,
            Self::Master => 2000,
        }
    }

    pub fn for_points(points: u64) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|l| points >= l.threshold())
            .unwrap_or(Self::Beginner)
    }

    pub fn next(self) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| *l > self)
    }

    /// Points still needed to reach the next level, if there is one.
    pub fn points_to_next(points: u64) -> Option<u64> {
        Self::for_points(points)
            .next()
            .map(|n| n.threshold().saturating_sub(points))
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beginner => write!(f, "Beginner"),
            Self::Novice => write!(f, "Novice"),
            Self::Intermediate => write!(f, "Intermediate"),
            Self::Advanced => write!(f, "Advanced"),
            Self::Expert => write!(f, "Expert"),
            Self::Master => write!(f, "Master"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reward {
    pub id: String,
    pub key: String,
    pub title: String,
    pub description: String,
    pub points: u64,
    pub unlocked_at: DateTime<Utc>,
}

impl Reward {
    pub fn new(key: &str, title: &str, description: &str, points: u64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            key: key.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            points,
            unlocked_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserProgress {
    pub total_points: u64,
    pub level: Level,
    pub unlocked_rewards: Vec<Reward>,
}

impl UserProgress {
    pub fn new(total_points: u64, unlocked_rewards: Vec<Reward>) -> Self {
        Self {
            total_points,
            level: Level::for_points(total_points),
            unlocked_rewards,
        }
    }

    pub fn has_reward(&self, key: &str) -> bool {
        self.unlocked_rewards.iter().any(|r| r.key == key)
    }
}
