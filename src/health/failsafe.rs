use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::models::health::{TimeRange, TodayHealthData, WorkoutSession};

use super::{BridgeResult, HealthBridge};

/// Wraps a bridge so every call is time-boxed and never fails: errors and
/// timeouts are logged and replaced by zero/empty defaults.
pub struct FailSafeBridge<B> {
    inner: B,
    timeout: Duration,
}

impl<B: HealthBridge> FailSafeBridge<B> {
    pub fn new(inner: B, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn guard<T, F>(&self, op: &'static str, call: F, default: T) -> T
    where
        F: Future<Output = BridgeResult<T>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => value,
            Ok(Err(e)) => {
                warn!(
                    bridge = self.inner.name(),
                    op,
                    code = %e.code,
                    error = %e.message,
                    "health bridge call failed, using default"
                );
                default
            }
            Err(_) => {
                warn!(
                    bridge = self.inner.name(),
                    op,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "health bridge call timed out, using default"
                );
                default
            }
        }
    }

    pub async fn is_available(&self) -> bool {
        self.guard("checkAvailability", self.inner.check_availability(), false)
            .await
    }

    pub async fn request_permissions(&self) -> bool {
        self.guard("requestPermissions", self.inner.request_permissions(), false)
            .await
    }

    pub async fn steps(&self, range: TimeRange) -> i64 {
        self.guard("getSteps", self.inner.get_steps(range), 0).await
    }

    pub async fn calories(&self, range: TimeRange) -> f64 {
        self.guard("getCalories", self.inner.get_calories(range), 0.0)
            .await
    }

    pub async fn workouts(&self, range: TimeRange) -> Vec<WorkoutSession> {
        self.guard("getWorkouts", self.inner.get_workouts(range), Vec::new())
            .await
    }

    pub async fn distance(&self, range: TimeRange) -> f64 {
        self.guard("getDistance", self.inner.get_distance(range), 0.0)
            .await
    }

    pub async fn latest_weight(&self, range: TimeRange) -> Option<f64> {
        self.guard("getLatestWeight", self.inner.get_latest_weight(range), None)
            .await
    }

    pub async fn today(&self) -> TodayHealthData {
        self.guard(
            "getTodayData",
            self.inner.get_today_data(),
            TodayHealthData::default(),
        )
        .await
    }
}
