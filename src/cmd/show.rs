use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use calorievita::core::analytics;
use calorievita::output::human;

use super::{day, open, print_ok};

pub fn run(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    date: Option<NaiveDate>,
    human_flag: bool,
) -> Result<()> {
    let (_config, db) = open()?;
    let to = to.unwrap_or_else(|| day(date));
    let from = from.unwrap_or(to);
    if from > to {
        anyhow::bail!("--from {} is after --to {}", from, to);
    }
    let entries = db.foods_in_range(from, to)?;
    let total: f64 = entries.iter().map(|e| e.calories).sum();

    if human_flag {
        if entries.is_empty() {
            println!("No entries found.");
        } else {
            for e in &entries {
                println!("{}", human::format_food(e));
            }
            println!(
                "Total: {} kcal",
                analytics::format_calories(total.round() as i64)
            );
        }
    } else {
        print_ok(
            "show",
            json!({
                "from": from,
                "to": to,
                "entries": entries,
                "count": entries.len(),
                "total_calories": total,
                "meals": analytics::meal_totals(&entries),
            }),
        )?;
    }
    Ok(())
}
