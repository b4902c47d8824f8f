use anyhow::Result;
use rusqlite::params;

use crate::models::streak::{GoalStreak, GoalType};

use super::Database;

struct StreakRow {
    goal_type: String,
    current_streak: u32,
    longest_streak: u32,
    last_achieved_date: Option<String>,
    achieved_today: bool,
    longest_before_run: u32,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StreakRow> {
    Ok(StreakRow {
        goal_type: row.get(0)?,
        current_streak: row.get(1)?,
        longest_streak: row.get(2)?,
        last_achieved_date: row.get(3)?,
        achieved_today: row.get(4)?,
        longest_before_run: row.get(5)?,
    })
}

fn row_to_streak(r: StreakRow) -> Result<GoalStreak> {
    Ok(GoalStreak {
        goal_type: r.goal_type.parse()?,
        current_streak: r.current_streak,
        longest_streak: r.longest_streak,
        last_achieved_date: r.last_achieved_date.map(|d| d.parse()).transpose()?,
        achieved_today: r.achieved_today,
        longest_before_run: r.longest_before_run,
    })
}

impl Database {
    /// Stored streak for a goal, or a fresh zeroed one.
    pub fn get_streak(&self, goal_type: GoalType) -> Result<GoalStreak> {
        let mut stmt = self.conn.prepare(
            "SELECT goal_type, current_streak, longest_streak, last_achieved_date, achieved_today,
                    longest_before_run
             FROM goal_streaks WHERE goal_type = ?1",
        )?;
        let mut rows = stmt.query_map(params![goal_type.to_string()], read_row)?;
        match rows.next() {
            Some(row) => row_to_streak(row?),
            None => Ok(GoalStreak::new(goal_type)),
        }
    }

    pub fn upsert_streak(&self, s: &GoalStreak) -> Result<()> {
        self.conn.execute(
            "INSERT INTO goal_streaks (goal_type, current_streak, longest_streak, last_achieved_date,
                                      achieved_today, longest_before_run)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(goal_type) DO UPDATE SET
                current_streak = excluded.current_streak,
                longest_streak = excluded.longest_streak,
                last_achieved_date = excluded.last_achieved_date,
                achieved_today = excluded.achieved_today,
                longest_before_run = excluded.longest_before_run",
            params![
                s.goal_type.to_string(),
                s.current_streak,
                s.longest_streak,
                s.last_achieved_date.map(|d| d.to_string()),
                s.achieved_today,
                s.longest_before_run,
            ],
        )?;
        Ok(())
    }

    /// One streak per goal type, in `GoalType::ALL` order.
    pub fn list_streaks(&self) -> Result<Vec<GoalStreak>> {
        GoalType::ALL.iter().map(|g| self.get_streak(*g)).collect()
    }
}
