use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use calorievita::core::{rewards, streak};
use calorievita::output::human;

use super::{day, open, print_new_rewards, print_ok};

pub fn run_show(date: Option<NaiveDate>, human_flag: bool) -> Result<()> {
    let (_config, db) = open()?;
    let today = day(date);
    let streaks: Vec<_> = db
        .list_streaks()?
        .iter()
        .map(|s| streak::as_of(s, today))
        .collect();

    if human_flag {
        for s in &streaks {
            println!("{}", human::format_streak(s));
        }
    } else {
        print_ok("streaks", json!({ "date": today, "streaks": streaks }))?;
    }
    Ok(())
}

/// Re-evaluate one day's goals, e.g. after `config set goals.*`.
pub fn run_check(date: Option<NaiveDate>, human_flag: bool) -> Result<()> {
    let (config, db) = open()?;
    let today = day(date);
    let updates = streak::evaluate_day(&db, &config, today)?;
    let update = rewards::apply(&db, &config, today)?;

    if human_flag {
        for u in &updates {
            let mark = if u.achieved { "met" } else { "not met" };
            println!("{:<9} {}", u.goal_type.title(), mark);
        }
        print_new_rewards(&update);
    } else {
        print_ok(
            "check",
            json!({
                "date": today,
                "goals": updates,
                "points_awarded": update.points_awarded,
                "new_rewards": update.new_rewards,
                "progress": update.progress,
            }),
        )?;
    }
    Ok(())
}
