use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::params;

use crate::models::summary::DailySummary;

use super::Database;

const SUMMARY_COLUMNS: &str = "date, calories_consumed, calories_burned, calories_goal, steps, steps_goal, water_glasses, water_glasses_goal";

struct SummaryRow {
    date: String,
    calories_consumed: i64,
    calories_burned: i64,
    calories_goal: i64,
    steps: i64,
    steps_goal: i64,
    water_glasses: i64,
    water_glasses_goal: i64,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SummaryRow> {
    Ok(SummaryRow {
        date: row.get(0)?,
        calories_consumed: row.get(1)?,
        calories_burned: row.get(2)?,
        calories_goal: row.get(3)?,
        steps: row.get(4)?,
        steps_goal: row.get(5)?,
        water_glasses: row.get(6)?,
        water_glasses_goal: row.get(7)?,
    })
}

fn row_to_summary(r: SummaryRow) -> Result<DailySummary> {
    Ok(DailySummary {
        date: r.date.parse()?,
        calories_consumed: r.calories_consumed,
        calories_burned: r.calories_burned,
        calories_goal: r.calories_goal,
        steps: r.steps,
        steps_goal: r.steps_goal,
        water_glasses: r.water_glasses,
        water_glasses_goal: r.water_glasses_goal,
    })
}

impl Database {
    pub fn upsert_summary(&self, s: &DailySummary) -> Result<()> {
        self.conn.execute(
            "INSERT INTO daily_summaries (date, calories_consumed, calories_burned, calories_goal, steps, steps_goal, water_glasses, water_glasses_goal)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(date) DO UPDATE SET
                calories_consumed = excluded.calories_consumed,
                calories_burned = excluded.calories_burned,
                calories_goal = excluded.calories_goal,
                steps = excluded.steps,
                steps_goal = excluded.steps_goal,
                water_glasses = excluded.water_glasses,
                water_glasses_goal = excluded.water_glasses_goal",
            params![
                s.date.to_string(),
                s.calories_consumed,
                s.calories_burned,
                s.calories_goal,
                s.steps,
                s.steps_goal,
                s.water_glasses,
                s.water_glasses_goal,
            ],
        )?;
        Ok(())
    }

    pub fn get_summary(&self, date: NaiveDate) -> Result<Option<DailySummary>> {
        let sql = format!("SELECT {SUMMARY_COLUMNS} FROM daily_summaries WHERE date = ?1");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query_map(params![date.to_string()], read_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row_to_summary(row?)?)),
            None => Ok(None),
        }
    }

    /// Stored summaries for `from..=to`, oldest first. Days without a row are
    /// simply absent.
    pub fn summaries_in_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DailySummary>> {
        let sql = format!(
            "SELECT {SUMMARY_COLUMNS} FROM daily_summaries
             WHERE date >= ?1 AND date <= ?2 ORDER BY date"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![from.to_string(), to.to_string()], read_row)?;

        let mut summaries = Vec::new();
        for row in rows {
            summaries.push(row_to_summary(row?)?);
        }
        Ok(summaries)
    }
}
