pub mod aggregation;
pub mod analytics;
pub mod insights;
pub mod logging;
pub mod rewards;
pub mod status;
pub mod streak;
pub mod summary;
