pub mod core;
pub mod db;
pub mod health;
pub mod models;
pub mod output;
pub mod telemetry;
