use async_trait::async_trait;
use chrono::Duration;

use crate::db::SharedDb;
use crate::models::health::{HealthSample, SampleKind, TimeRange, WorkoutSession};

use super::{BridgeError, BridgeResult, HealthBridge};

/// Bridge backed by activity samples logged into the local database.
pub struct LocalHealthBridge {
    db: SharedDb,
}

impl LocalHealthBridge {
    pub fn new(db: SharedDb) -> Self {
        Self { db }
    }

    fn samples(&self, kind: SampleKind, range: &TimeRange) -> BridgeResult<Vec<HealthSample>> {
        let db = self
            .db
            .lock()
            .map_err(|_| BridgeError::query_failed("database lock poisoned"))?;
        db.samples_in_range(kind, range)
            .map_err(|e| BridgeError::query_failed(e.to_string()))
    }

    fn sum(&self, kind: SampleKind, range: &TimeRange) -> BridgeResult<f64> {
        Ok(self.samples(kind, range)?.iter().map(|s| s.value).sum())
    }
}

fn session_of(sample: &HealthSample) -> WorkoutSession {
    sample.session().unwrap_or_else(|| WorkoutSession {
        start: sample.timestamp - Duration::minutes(sample.value.round() as i64),
        end: sample.timestamp,
    })
}

#[async_trait]
impl HealthBridge for LocalHealthBridge {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn check_availability(&self) -> BridgeResult<bool> {
        Ok(true)
    }

    async fn request_permissions(&self) -> BridgeResult<bool> {
        Ok(true)
    }

    async fn get_steps(&self, range: TimeRange) -> BridgeResult<i64> {
        Ok(self.sum(SampleKind::Steps, &range)?.round() as i64)
    }

    async fn get_calories(&self, range: TimeRange) -> BridgeResult<f64> {
        self.sum(SampleKind::CaloriesBurned, &range)
    }

    async fn get_workouts(&self, range: TimeRange) -> BridgeResult<Vec<WorkoutSession>> {
        Ok(self
            .samples(SampleKind::Workout, &range)?
            .iter()
            .map(session_of)
            .collect())
    }

    async fn get_distance(&self, range: TimeRange) -> BridgeResult<f64> {
        self.sum(SampleKind::Distance, &range)
    }

    async fn get_latest_weight(&self, range: TimeRange) -> BridgeResult<Option<f64>> {
        Ok(self
            .samples(SampleKind::Weight, &range)?
            .last()
            .map(|s| s.value))
    }
}

/// Bridge for platforms without a health provider.
pub struct UnavailableBridge;

#[async_trait]
impl HealthBridge for UnavailableBridge {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn check_availability(&self) -> BridgeResult<bool> {
        Ok(false)
    }

    async fn request_permissions(&self) -> BridgeResult<bool> {
        Err(BridgeError::unavailable("health data provider not installed"))
    }

    async fn get_steps(&self, _range: TimeRange) -> BridgeResult<i64> {
        Err(BridgeError::unavailable("health data provider not installed"))
    }

    async fn get_calories(&self, _range: TimeRange) -> BridgeResult<f64> {
        Err(BridgeError::unavailable("health data provider not installed"))
    }

    async fn get_workouts(&self, _range: TimeRange) -> BridgeResult<Vec<WorkoutSession>> {
        Err(BridgeError::unavailable("health data provider not installed"))
    }
}
