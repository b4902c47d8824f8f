use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::params;

use crate::models::health::{HealthSample, SampleKind, TimeRange};

use super::Database;

struct SampleRow {
    id: String,
    timestamp: String,
    kind: String,
    value: f64,
    start_ts: Option<String>,
    end_ts: Option<String>,
    source: String,
}

/// Fixed-width UTC form so timestamps compare correctly as text.
fn fmt_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_ts(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}

fn row_to_sample(r: SampleRow) -> Result<HealthSample> {
    let kind: SampleKind = r.kind.parse()?;
    Ok(HealthSample {
        id: r.id,
        timestamp: parse_ts(&r.timestamp)?,
        kind,
        value: r.value,
        start: r.start_ts.as_deref().map(parse_ts).transpose()?,
        end: r.end_ts.as_deref().map(parse_ts).transpose()?,
        source: r.source,
    })
}

impl Database {
    pub fn insert_sample(&self, s: &HealthSample) -> Result<()> {
        self.conn.execute(
            "INSERT INTO health_samples (id, timestamp, kind, value, start_ts, end_ts, source)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                s.id,
                fmt_ts(s.timestamp),
                s.kind.to_string(),
                s.value,
                s.start.map(fmt_ts),
                s.end.map(fmt_ts),
                s.source,
            ],
        )?;
        Ok(())
    }

    /// Samples of `kind` timestamped inside `range`, oldest first.
    pub fn samples_in_range(&self, kind: SampleKind, range: &TimeRange) -> Result<Vec<HealthSample>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, timestamp, kind, value, start_ts, end_ts, source
             FROM health_samples
             WHERE kind = ?1 AND timestamp >= ?2 AND timestamp < ?3
             ORDER BY timestamp",
        )?;
        let rows = stmt.query_map(
            params![
                kind.to_string(),
                fmt_ts(range.start),
                fmt_ts(range.end)
            ],
            |row| {
                Ok(SampleRow {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    kind: row.get(2)?,
                    value: row.get(3)?,
                    start_ts: row.get(4)?,
                    end_ts: row.get(5)?,
                    source: row.get(6)?,
                })
            },
        )?;

        let mut samples = Vec::new();
        for row in rows {
            samples.push(row_to_sample(row?)?);
        }
        Ok(samples)
    }
}
