//! Named-method RPC surface over a [`HealthBridge`].
//!
//! Each call carries a method name and optional JSON arguments and answers
//! with a primitive or a flat map. Errors come back as `(code, message)`.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::models::health::TimeRange;

use super::{BridgeError, BridgeResult, ErrorCode, HealthBridge, day_data};

pub const METHODS: [&str; 6] = [
    "checkAvailability",
    "requestPermissions",
    "getTodaySteps",
    "getTodayCalories",
    "getTodayWorkouts",
    "getTodayData",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub args: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            args: Value::Null,
        }
    }

    pub fn with_args(mut self, args: Value) -> Self {
        self.args = args;
        self
    }

    /// The `date` argument (YYYY-MM-DD), defaulting to the local today.
    fn date(&self) -> BridgeResult<NaiveDate> {
        match self.args.get("date") {
            None | Some(Value::Null) => Ok(Local::now().date_naive()),
            Some(Value::String(s)) => s.parse().map_err(|_| {
                BridgeError::new(
                    ErrorCode::InvalidArgs,
                    format!("invalid date: {} (expected YYYY-MM-DD)", s),
                )
            }),
            Some(other) => Err(BridgeError::new(
                ErrorCode::InvalidArgs,
                format!("date must be a string, got {}", other),
            )),
        }
    }
}

pub async fn dispatch(bridge: &dyn HealthBridge, call: &MethodCall) -> BridgeResult<Value> {
    tracing::debug!(bridge = bridge.name(), method = %call.method, "dispatching bridge call");
    match call.method.as_str() {
        "checkAvailability" => Ok(json!(bridge.check_availability().await?)),
        "requestPermissions" => Ok(json!(bridge.request_permissions().await?)),
        "getTodaySteps" => {
            let range = TimeRange::for_day(call.date()?);
            Ok(json!(bridge.get_steps(range).await?))
        }
        "getTodayCalories" => {
            let range = TimeRange::for_day(call.date()?);
            Ok(json!(bridge.get_calories(range).await?))
        }
        "getTodayWorkouts" => {
            let range = TimeRange::for_day(call.date()?);
            let sessions: Vec<Value> = bridge
                .get_workouts(range)
                .await?
                .iter()
                .map(|w| {
                    json!({
                        "start": w.start.timestamp_millis(),
                        "end": w.end.timestamp_millis(),
                        "durationMinutes": w.duration_minutes(),
                    })
                })
                .collect();
            Ok(Value::Array(sessions))
        }
        "getTodayData" => {
            let data = match call.args.get("date") {
                None | Some(Value::Null) => bridge.get_today_data().await?,
                Some(_) => day_data(bridge, TimeRange::for_day(call.date()?)).await?,
            };
            Ok(json!({
                "steps": data.steps,
                "caloriesBurned": data.calories_burned,
                "workoutSessions": data.workout_sessions,
                "workoutDuration": data.workout_duration_minutes,
            }))
        }
        other => Err(BridgeError::new(
            ErrorCode::UnknownMethod,
            format!("unknown method: {} (expected one of {})", other, METHODS.join(", ")),
        )),
    }
}
