//! Periodic metric aggregation over the summary store and the health bridge.
//!
//! Every fetch pulls a window of stored summaries and per-day bridge readings
//! concurrently, merges them under a [`MergePolicy`] and publishes the result
//! on a `watch` channel. A failing source is replaced by zero-filled
//! placeholders rather than failing the fetch.
//!
//! Fetches are not serialised against each other. Each one is stamped with a
//! generation when it starts, and a result is only published if nothing newer
//! has been published in the meantime, so a slow, superseded fetch can no
//! longer overwrite the window the caller switched to.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Days, Local, NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::core::analytics::PeriodTotals;
use crate::core::summary::SummaryStore;
use crate::health::HealthBridge;
use crate::models::config::{Goals, MergePolicy};
use crate::models::health::TimeRange;
use crate::models::summary::DailySummary;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);
/// Longest window a single fetch covers; larger requests are clamped.
pub const MAX_WINDOW_DAYS: u32 = 366;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    pub fn days(self) -> u32 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
            Self::Monthly => 30,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => anyhow::bail!("invalid period: {} (expected daily/weekly/monthly)", s),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateSnapshot {
    pub days: u32,
    pub generation: u64,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// One entry per day of the window, oldest first.
    pub summaries: Vec<DailySummary>,
    pub totals: PeriodTotals,
    pub store_ok: bool,
    pub bridge_ok: bool,
    pub policy: MergePolicy,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl AggregateSnapshot {
    fn empty(policy: MergePolicy) -> Self {
        Self {
            days: 0,
            generation: 0,
            from: None,
            to: None,
            summaries: Vec::new(),
            totals: PeriodTotals::default(),
            store_ok: false,
            bridge_ok: false,
            policy,
            fetched_at: None,
        }
    }

    pub fn latest(&self) -> Option<&DailySummary> {
        self.summaries.last()
    }
}

/// Bridge readings for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct BridgeDay {
    steps: i64,
    calories_burned: i64,
}

struct State {
    days: u32,
    published: u64,
}

pub struct AggregationService<S, B> {
    store: S,
    bridge: B,
    goals: Goals,
    policy: MergePolicy,
    timeout: Duration,
    today: Option<NaiveDate>,
    state: Mutex<State>,
    generation: AtomicU64,
    tx: watch::Sender<AggregateSnapshot>,
}

impl<S: SummaryStore, B: HealthBridge> AggregationService<S, B> {
    pub fn new(store: S, bridge: B, goals: Goals) -> Self {
        let policy = MergePolicy::default();
        let (tx, _rx) = watch::channel(AggregateSnapshot::empty(policy));
        Self {
            store,
            bridge,
            goals,
            policy,
            timeout: DEFAULT_TIMEOUT,
            today: None,
            state: Mutex::new(State {
                days: 0,
                published: 0,
            }),
            generation: AtomicU64::new(0),
            tx,
        }
    }

    pub fn with_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self.tx.send_modify(|s| s.policy = policy);
        self
    }

    /// Per-source time budget for one fetch.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pin the last day of every window instead of using the local date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<AggregateSnapshot> {
        self.tx.subscribe()
    }

    /// The most recently published snapshot.
    pub fn current(&self) -> AggregateSnapshot {
        self.tx.borrow().clone()
    }

    pub async fn initialize(&self, days: u32) -> AggregateSnapshot {
        info!(days, policy = %self.policy, "initializing aggregation");
        self.fetch(days).await
    }

    pub async fn update_period(&self, days: u32) -> AggregateSnapshot {
        debug!(days, "aggregation period changed");
        self.fetch(days).await
    }

    /// Re-fetch the current window (one day if never initialized).
    pub async fn refresh(&self) -> AggregateSnapshot {
        let days = self.state.lock().map(|s| s.days).unwrap_or(0).max(1);
        self.fetch(days).await
    }

    async fn fetch(&self, days: u32) -> AggregateSnapshot {
        let days = days.clamp(1, MAX_WINDOW_DAYS);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut state) = self.state.lock() {
            state.days = days;
        }

        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let dates: Vec<NaiveDate> = (0..days)
            .rev()
            .filter_map(|back| today.checked_sub_days(Days::new(u64::from(back))))
            .collect();
        let from = dates.first().copied().unwrap_or(today);

        let (stored, bridged) = tokio::join!(
            self.fetch_store(from, today),
            self.fetch_bridge(&dates)
        );

        let store_ok = stored.is_some();
        let bridge_ok = bridged.is_some();
        let summaries = merge(
            &dates,
            stored.unwrap_or_default(),
            bridged.as_deref(),
            &self.goals,
            self.policy,
        );
        let snapshot = AggregateSnapshot {
            days,
            generation,
            from: Some(from),
            to: Some(today),
            totals: PeriodTotals::from_summaries(&summaries),
            summaries,
            store_ok,
            bridge_ok,
            policy: self.policy,
            fetched_at: Some(Utc::now()),
        };

        self.publish(&snapshot);
        snapshot
    }

    fn publish(&self, snapshot: &AggregateSnapshot) {
        let Ok(mut state) = self.state.lock() else {
            warn!("aggregation state poisoned, snapshot not published");
            return;
        };
        if snapshot.generation <= state.published {
            debug!(
                generation = snapshot.generation,
                published = state.published,
                "discarding superseded aggregation result"
            );
            return;
        }
        state.published = snapshot.generation;
        self.tx.send_replace(snapshot.clone());
    }

    async fn fetch_store(&self, from: NaiveDate, to: NaiveDate) -> Option<Vec<DailySummary>> {
        match tokio::time::timeout(self.timeout, self.store.fetch_summaries(from, to)).await {
            Ok(Ok(rows)) => Some(rows),
            Ok(Err(e)) => {
                warn!(error = %e, "summary store fetch failed, using placeholders");
                None
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "summary store fetch timed out, using placeholders"
                );
                None
            }
        }
    }

    async fn fetch_bridge(&self, dates: &[NaiveDate]) -> Option<Vec<BridgeDay>> {
        if self.policy == MergePolicy::StoreOnly {
            return None;
        }
        let query = async {
            let mut out = Vec::with_capacity(dates.len());
            for date in dates {
                let range = TimeRange::for_day(*date);
                let steps = self.bridge.get_steps(range).await?;
                let calories = self.bridge.get_calories(range).await?;
                out.push(BridgeDay {
                    steps,
                    calories_burned: calories.round() as i64,
                });
            }
            Ok::<_, crate::health::BridgeError>(out)
        };
        match tokio::time::timeout(self.timeout, query).await {
            Ok(Ok(days)) => Some(days),
            Ok(Err(e)) => {
                warn!(
                    bridge = self.bridge.name(),
                    code = %e.code,
                    error = %e.message,
                    "health bridge fetch failed, using placeholders"
                );
                None
            }
            Err(_) => {
                warn!(
                    bridge = self.bridge.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "health bridge fetch timed out, using placeholders"
                );
                None
            }
        }
    }
}

/// Build one summary per date from the stored rows and the bridge readings.
///
/// Consumption, water and goals always come from the store. Steps and burned
/// calories follow the policy. A missing source contributes zeros.
fn merge(
    dates: &[NaiveDate],
    stored: Vec<DailySummary>,
    bridged: Option<&[BridgeDay]>,
    goals: &Goals,
    policy: MergePolicy,
) -> Vec<DailySummary> {
    let mut by_date: HashMap<NaiveDate, DailySummary> =
        stored.into_iter().map(|s| (s.date, s)).collect();

    dates
        .iter()
        .enumerate()
        .map(|(i, date)| {
            let mut s = by_date
                .remove(date)
                .unwrap_or_else(|| DailySummary::zeroed(*date, goals));
            let b = bridged.and_then(|days| days.get(i)).copied().unwrap_or_default();
            match policy {
                MergePolicy::PreferLarger => {
                    s.steps = s.steps.max(b.steps);
                    s.calories_burned = s.calories_burned.max(b.calories_burned);
                }
                MergePolicy::StoreOnly => {}
                MergePolicy::BridgeOnly => {
                    s.steps = b.steps;
                    s.calories_burned = b.calories_burned;
                }
            }
            s
        })
        .collect()
}
