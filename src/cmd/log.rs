use anyhow::Result;
use serde_json::json;

use calorievita::core::logging::{self, FoodInput};
use calorievita::output::human;

use super::{after_write, day, open, print_new_rewards, print_ok};

pub fn run(input: FoodInput, human_flag: bool) -> Result<()> {
    let (config, db) = open()?;
    let entry = logging::log_food(&db, &config, &input)?;
    let date = day(input.date);
    let update = after_write(&db, &config, date)?;

    if human_flag {
        println!("Logged: {}", human::format_food(&entry));
        print_new_rewards(&update);
    } else {
        print_ok(
            "log",
            json!({
                "entry": entry,
                "new_rewards": update.new_rewards,
                "points_awarded": update.points_awarded,
            }),
        )?;
    }
    Ok(())
}

pub fn run_quick(text: &str, input: FoodInput, human_flag: bool) -> Result<()> {
    let parsed = logging::parse_quick_add(text)?;
    let merged = FoodInput {
        meal: input.meal,
        serving: input.serving,
        note: input.note,
        source: input.source,
        date: input.date,
        ..parsed.into_input()
    };
    run(merged, human_flag)
}

pub fn run_batch(batch_json: &str, human_flag: bool) -> Result<()> {
    let (config, db) = open()?;
    let entries = logging::log_batch(&db, &config, batch_json)?;

    let mut days: Vec<_> = entries
        .iter()
        .map(|e| e.timestamp.with_timezone(&chrono::Local).date_naive())
        .collect();
    days.sort();
    days.dedup();
    let mut new_rewards = Vec::new();
    for d in days {
        new_rewards.extend(after_write(&db, &config, d)?.new_rewards);
    }

    if human_flag {
        println!("Logged {} entries", entries.len());
        for e in &entries {
            println!("  {}", human::format_food(e));
        }
        for r in &new_rewards {
            println!("Reward unlocked: {} (+{} pts)", r.title, r.points);
        }
    } else {
        print_ok(
            "log",
            json!({
                "entries": entries,
                "count": entries.len(),
                "new_rewards": new_rewards,
            }),
        )?;
    }
    Ok(())
}

pub fn run_delete(id: &str, human_flag: bool) -> Result<()> {
    let (config, db) = open()?;
    let entry = db.get_food(id)?;
    if !logging::delete_food(&db, &config, id)? {
        anyhow::bail!("no food entry with id {}", id);
    }
    if let Some(f) = &entry {
        let d = f.timestamp.with_timezone(&chrono::Local).date_naive();
        after_write(&db, &config, d)?;
    }

    if human_flag {
        println!("Deleted {}", id);
    } else {
        print_ok("delete", json!({ "id": id, "deleted": true }))?;
    }
    Ok(())
}
