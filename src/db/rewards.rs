use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{OptionalExtension, params};

use crate::models::reward::{Reward, UserProgress};

use super::Database;

struct RewardRow {
    id: String,
    key: String,
    title: String,
    description: String,
    points: i64,
    unlocked_at: String,
}

fn row_to_reward(r: RewardRow) -> Result<Reward> {
    let unlocked_at: DateTime<Utc> =
        DateTime::parse_from_rfc3339(&r.unlocked_at)?.with_timezone(&Utc);
    Ok(Reward {
        id: r.id,
        key: r.key,
        title: r.title,
        description: r.description,
        points: r.points.max(0) as u64,
        unlocked_at,
    })
}

impl Database {
    pub fn total_points(&self) -> Result<u64> {
        let n: i64 = self.conn.query_row(
            "SELECT total_points FROM progress WHERE id = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(n.max(0) as u64)
    }

    pub fn add_points(&self, points: u64) -> Result<u64> {
        self.conn.execute(
            "UPDATE progress SET total_points = total_points + ?1 WHERE id = 1",
            params![points as i64],
        )?;
        self.total_points()
    }

    /// Award points once per `(day, reason)`. Returns false if already awarded.
    pub fn award_once(&self, day: NaiveDate, reason: &str, points: u64) -> Result<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO point_awards (day, reason, points) VALUES (?1, ?2, ?3)",
            params![day.to_string(), reason, points as i64],
        )?;
        if inserted == 0 {
            return Ok(false);
        }
        self.add_points(points)?;
        Ok(true)
    }

    /// Undo an award made by `award_once`. Returns false if there was none.
    pub fn revoke_award(&self, day: NaiveDate, reason: &str) -> Result<bool> {
        let points: Option<i64> = self
            .conn
            .query_row(
                "SELECT points FROM point_awards WHERE day = ?1 AND reason = ?2",
                params![day.to_string(), reason],
                |row| row.get(0),
            )
            .optional()?;
        let Some(points) = points else {
            return Ok(false);
        };
        self.conn.execute(
            "DELETE FROM point_awards WHERE day = ?1 AND reason = ?2",
            params![day.to_string(), reason],
        )?;
        self.conn.execute(
            "UPDATE progress SET total_points = MAX(total_points - ?1, 0) WHERE id = 1",
            params![points],
        )?;
        Ok(true)
    }

    /// Append an unlocked reward. Returns false if the key was already unlocked.
    pub fn insert_reward(&self, r: &Reward) -> Result<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO rewards (id, key, title, description, points, unlocked_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                r.id,
                r.key,
                r.title,
                r.description,
                r.points as i64,
                r.unlocked_at.to_rfc3339(),
            ],
        )?;
        Ok(inserted > 0)
    }

    pub fn has_reward(&self, key: &str) -> Result<bool> {
        let n: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM rewards WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )?;
        Ok(n > 0)
    }

    /// Unlocked rewards in unlock order.
    pub fn list_rewards(&self) -> Result<Vec<Reward>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, key, title, description, points, unlocked_at
             FROM rewards ORDER BY unlocked_at, rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(RewardRow {
                id: row.get(0)?,
                key: row.get(1)?,
                title: row.get(2)?,
                description: row.get(3)?,
                points: row.get(4)?,
                unlocked_at: row.get(5)?,
            })
        })?;

        let mut rewards = Vec::new();
        for row in rows {
            rewards.push(row_to_reward(row?)?);
        }
        Ok(rewards)
    }

    pub fn get_progress(&self) -> Result<UserProgress> {
        Ok(UserProgress::new(self.total_points()?, self.list_rewards()?))
    }
}
