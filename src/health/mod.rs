//! Platform health data bridge.
//!
//! The aggregation layer only ever sees the narrow [`HealthBridge`] contract:
//! given a time range, return a step count, a calorie total, or a list of
//! workout sessions. Implementations report failures as a [`BridgeError`]
//! carrying a `(code, message)` pair; callers that want the swallow-and-default
//! behaviour wrap a bridge in [`FailSafeBridge`].

pub mod channel;
mod failsafe;
mod local;

pub use failsafe::FailSafeBridge;
pub use local::{LocalHealthBridge, UnavailableBridge};

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::models::health::{FitnessSnapshot, TimeRange, TodayHealthData, WorkoutSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Unavailable,
    PermissionDenied,
    QueryFailed,
    Timeout,
    UnknownMethod,
    InvalidArgs,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::PermissionDenied => write!(f, "PERMISSION_DENIED"),
            Self::QueryFailed => write!(f, "QUERY_FAILED"),
            Self::Timeout => write!(f, "TIMEOUT"),
            Self::UnknownMethod => write!(f, "UNKNOWN_METHOD"),
            Self::InvalidArgs => write!(f, "INVALID_ARGS"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("{code}: {message}")]
pub struct BridgeError {
    pub code: ErrorCode,
    pub message: String,
}

impl BridgeError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unavailable, message)
    }

    pub fn query_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::QueryFailed, message)
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;

#[async_trait]
pub trait HealthBridge: Send + Sync {
    fn name(&self) -> &'static str;

    async fn check_availability(&self) -> BridgeResult<bool>;

    async fn request_permissions(&self) -> BridgeResult<bool>;

    async fn get_steps(&self, range: TimeRange) -> BridgeResult<i64>;

    async fn get_calories(&self, range: TimeRange) -> BridgeResult<f64>;

    async fn get_workouts(&self, range: TimeRange) -> BridgeResult<Vec<WorkoutSession>>;

    async fn get_distance(&self, _range: TimeRange) -> BridgeResult<f64> {
        Ok(0.0)
    }

    async fn get_latest_weight(&self, _range: TimeRange) -> BridgeResult<Option<f64>> {
        Ok(None)
    }

    async fn get_today_data(&self) -> BridgeResult<TodayHealthData> {
        day_data(self, TimeRange::for_day(Local::now().date_naive())).await
    }
}

/// Steps, calories and workouts for one range, composed from the single
/// queries. The first failing query fails the whole call.
pub async fn day_data<B: HealthBridge + ?Sized>(
    bridge: &B,
    range: TimeRange,
) -> BridgeResult<TodayHealthData> {
    let steps = bridge.get_steps(range).await?;
    let calories_burned = bridge.get_calories(range).await?;
    let workouts = bridge.get_workouts(range).await?;
    Ok(TodayHealthData {
        steps,
        calories_burned,
        workout_sessions: workouts.len() as u32,
        workout_duration_minutes: workouts.iter().map(|w| w.duration_minutes()).sum(),
    })
}

/// Build the per-day fitness snapshot. Never fails: every reading falls back
/// to its default independently.
pub async fn fitness_snapshot<B: HealthBridge>(
    bridge: &FailSafeBridge<B>,
    date: NaiveDate,
) -> FitnessSnapshot {
    let range = TimeRange::for_day(date);
    let (steps, calories_burned, distance_km, weight_kg) = tokio::join!(
        bridge.steps(range),
        bridge.calories(range),
        bridge.distance(range),
        bridge.latest_weight(range),
    );
    FitnessSnapshot {
        date,
        steps,
        calories_burned,
        distance_km,
        weight_kg,
    }
}
