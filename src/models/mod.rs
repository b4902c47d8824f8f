pub mod config;
pub mod food;
pub mod health;
pub mod reward;
pub mod streak;
pub mod summary;

pub use food::{FoodEntry, Meal};
pub use summary::{DailySummary, MacroBreakdown};
