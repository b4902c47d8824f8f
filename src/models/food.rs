use chrono::{DateTime, Local, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl Meal {
    pub const ALL: [Meal; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];

    /// Pick a meal slot from the local hour the food was eaten.
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            4..=10 => Self::Breakfast,
            11..=15 => Self::Lunch,
            16..=21 => Self::Dinner,
            _ => Self::Snack,
        }
    }

    pub fn for_timestamp(ts: DateTime<Utc>) -> Self {
        Self::for_hour(ts.with_timezone(&Local).hour())
    }
}

impl std::fmt::Display for Meal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Breakfast => write!(f, "breakfast"),
            Self::Lunch => write!(f, "lunch"),
            Self::Dinner => write!(f, "dinner"),
            Self::Snack => write!(f, "snack"),
        }
    }
}

impl FromStr for Meal {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" | "snacks" => Ok(Self::Snack),
            _ => anyhow::bail!(
                "invalid meal: {} (expected breakfast/lunch/dinner/snack)",
                s
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub meal: Meal,
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub source: String,
}

impl FoodEntry {
    pub fn new(name: impl Into<String>, calories: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: now,
            name: name.into(),
            meal: Meal::for_timestamp(now),
            calories,
            carbs: 0.0,
            protein: 0.0,
            fat: 0.0,
            fiber: 0.0,
            sugar: 0.0,
            serving: None,
            note: None,
            source: "manual".to_string(),
        }
    }

    pub fn total_macros(&self) -> f64 {
        self.carbs + self.protein + self.fat
    }

    pub fn with_macros(mut self, carbs: f64, protein: f64, fat: f64) -> Self {
        self.carbs = carbs;
        self.protein = protein;
        self.fat = fat;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_from_str_accepts_case_and_plural() {
        assert_eq!("Breakfast".parse::<Meal>().unwrap(), Meal::Breakfast);
        assert_eq!("snacks".parse::<Meal>().unwrap(), Meal::Snack);
        assert!("brunch".parse::<Meal>().is_err());
    }

    #[test]
    fn meal_for_hour_boundaries() {
        assert_eq!(Meal::for_hour(3), Meal::Snack);
        assert_eq!(Meal::for_hour(4), Meal::Breakfast);
        assert_eq!(Meal::for_hour(11), Meal::Lunch);
        assert_eq!(Meal::for_hour(16), Meal::Dinner);
        assert_eq!(Meal::for_hour(22), Meal::Snack);
    }

    #[test]
    fn new_entry_defaults() {
        let f = FoodEntry::new("apple", 95.0).with_macros(25.0, 0.5, 0.3);
        assert_eq!(f.source, "manual");
        assert_eq!(f.carbs, 25.0);
        assert!(f.serving.is_none());
    }
}
