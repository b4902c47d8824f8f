use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Half-open `[start, end)` interval of instants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Local midnight of `date` up to the following local midnight.
    pub fn for_day(date: NaiveDate) -> Self {
        let start = local_midnight(date);
        let end = local_midnight(date + Duration::days(1));
        Self { start, end }
    }

    /// The `days` calendar days ending with (and including) `today`.
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        let first = today
            .checked_sub_days(chrono::Days::new(u64::from(days.saturating_sub(1))))
            .unwrap_or(NaiveDate::MIN);
        Self {
            start: local_midnight(first),
            end: local_midnight(today + Duration::days(1)),
        }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts < self.end
    }
}

/// Noon local time on `date`, the instant used for back-dated entries.
pub fn local_noon(date: NaiveDate) -> DateTime<Utc> {
    local_at(date, NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN))
}

fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    local_at(date, NaiveTime::MIN)
}

fn local_at(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    let naive = date.and_time(time);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSession {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl WorkoutSession {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes().max(0)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct TodayHealthData {
    pub steps: i64,
    pub calories_burned: f64,
    pub workout_sessions: u32,
    pub workout_duration_minutes: i64,
}

/// Point-in-time fitness readings for one day. Rebuilt on every query.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FitnessSnapshot {
    pub date: NaiveDate,
    pub steps: i64,
    pub calories_burned: f64,
    pub distance_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SampleKind {
    Steps,
    CaloriesBurned,
    Workout,
    Distance,
    Weight,
}

impl SampleKind {
    pub fn unit(self) -> &'static str {
        match self {
            Self::Steps => "steps",
            Self::CaloriesBurned => "kcal",
            Self::Workout => "min",
            Self::Distance => "km",
            Self::Weight => "kg",
        }
    }

    /// Largest single sample accepted, in `unit()`.
    pub fn max_value(self) -> f64 {
        match self {
            Self::Steps => 200_000.0,
            Self::CaloriesBurned => 20_000.0,
            Self::Workout => 1_440.0,
            Self::Distance => 1_000.0,
            Self::Weight => 1_000.0,
        }
    }
}

impl std::fmt::Display for SampleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Steps => write!(f, "steps"),
            Self::CaloriesBurned => write!(f, "calories_burned"),
            Self::Workout => write!(f, "workout"),
            Self::Distance => write!(f, "distance"),
            Self::Weight => write!(f, "weight"),
        }
    }
}

impl FromStr for SampleKind {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "steps" => Ok(Self::Steps),
            "calories_burned" | "calories" => Ok(Self::CaloriesBurned),
            "workout" => Ok(Self::Workout),
            "distance" => Ok(Self::Distance),
            "weight" => Ok(Self::Weight),
            _ => anyhow::bail!(
                "invalid activity kind: {} (expected steps/calories_burned/workout/distance/weight)",
                s
            ),
        }
    }
}

/// Raw activity reading backing the local health bridge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthSample {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub kind: SampleKind,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    pub source: String,
}

impl HealthSample {
    pub fn new(kind: SampleKind, value: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            kind,
            value,
            start: None,
            end: None,
            source: "manual".to_string(),
        }
    }

    /// A workout of `minutes` ending at `end`.
    pub fn workout(end: DateTime<Utc>, minutes: i64) -> Self {
        let mut s = Self::new(SampleKind::Workout, minutes as f64);
        s.timestamp = end;
        s.start = Some(end - Duration::minutes(minutes));
        s.end = Some(end);
        s
    }

    pub fn session(&self) -> Option<WorkoutSession> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(WorkoutSession { start, end }),
            _ => None,
        }
    }
}
