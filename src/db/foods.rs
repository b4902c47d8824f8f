use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, Utc};
use rusqlite::params;

use crate::models::food::FoodEntry;

use super::Database;

const FOOD_COLUMNS: &str = "id, timestamp, name, meal, calories, carbs, protein, fat, fiber, sugar, serving, note, source";

struct FoodRow {
    id: String,
    timestamp: String,
    name: String,
    meal: String,
    calories: f64,
    carbs: f64,
    protein: f64,
    fat: f64,
    fiber: f64,
    sugar: f64,
    serving: Option<String>,
    note: Option<String>,
    source: String,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FoodRow> {
    Ok(FoodRow {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        name: row.get(2)?,
        meal: row.get(3)?,
        calories: row.get(4)?,
        carbs: row.get(5)?,
        protein: row.get(6)?,
        fat: row.get(7)?,
        fiber: row.get(8)?,
        sugar: row.get(9)?,
        serving: row.get(10)?,
        note: row.get(11)?,
        source: row.get(12)?,
    })
}

fn row_to_food(r: FoodRow) -> Result<FoodEntry> {
    let timestamp: DateTime<Utc> = DateTime::parse_from_rfc3339(&r.timestamp)?.with_timezone(&Utc);
    Ok(FoodEntry {
        id: r.id,
        timestamp,
        name: r.name,
        meal: r.meal.parse()?,
        calories: r.calories,
        carbs: r.carbs,
        protein: r.protein,
        fat: r.fat,
        fiber: r.fiber,
        sugar: r.sugar,
        serving: r.serving,
        note: r.note,
        source: r.source,
    })
}

/// Calendar day an entry counts towards, in local time.
pub(crate) fn local_day(ts: DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&Local).date_naive()
}

impl Database {
    pub fn insert_food(&self, f: &FoodEntry) -> Result<()> {
        self.conn.execute(
            "INSERT INTO food_entries (id, timestamp, day, name, meal, calories, carbs, protein, fat, fiber, sugar, serving, note, source)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                f.id,
                f.timestamp.to_rfc3339(),
                local_day(f.timestamp).to_string(),
                f.name,
                f.meal.to_string(),
                f.calories,
                f.carbs,
                f.protein,
                f.fat,
                f.fiber,
                f.sugar,
                f.serving,
                f.note,
                f.source,
            ],
        )?;
        Ok(())
    }

    pub fn foods_by_date(&self, date: NaiveDate) -> Result<Vec<FoodEntry>> {
        self.foods_in_range(date, date)
    }

    /// Entries whose local day falls within `from..=to`, oldest first.
    pub fn foods_in_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<FoodEntry>> {
        let sql = format!(
            "SELECT {FOOD_COLUMNS} FROM food_entries
             WHERE day >= ?1 AND day <= ?2 ORDER BY timestamp"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![from.to_string(), to.to_string()], read_row)?;

        let mut foods = Vec::new();
        for row in rows {
            foods.push(row_to_food(row?)?);
        }
        Ok(foods)
    }

    pub fn get_food(&self, id: &str) -> Result<Option<FoodEntry>> {
        let sql = format!("SELECT {FOOD_COLUMNS} FROM food_entries WHERE id = ?1");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query_map(params![id], read_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row_to_food(row?)?)),
            None => Ok(None),
        }
    }

    pub fn delete_food(&self, id: &str) -> Result<bool> {
        let count = self
            .conn
            .execute("DELETE FROM food_entries WHERE id = ?1", params![id])?;
        Ok(count > 0)
    }

    /// Distinct days with at least one food entry, most recent first.
    pub fn distinct_food_dates(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<NaiveDate>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT day FROM food_entries
             WHERE day >= ?1 AND day <= ?2 ORDER BY day DESC",
        )?;
        let rows = stmt.query_map(params![from.to_string(), to.to_string()], |row| {
            row.get::<_, String>(0)
        })?;

        let mut dates = Vec::new();
        for row in rows {
            dates.push(row?.parse()?);
        }
        Ok(dates)
    }

    pub fn count_foods(&self) -> Result<u64> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM food_entries", [], |row| row.get(0))?;
        Ok(n as u64)
    }
}
