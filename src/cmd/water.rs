use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use calorievita::core::logging;

use super::{after_write, day, open, print_new_rewards, print_ok};

pub fn run(glasses: i64, date: Option<NaiveDate>, human_flag: bool) -> Result<()> {
    let (config, db) = open()?;
    let summary = logging::log_water(&db, &config, glasses, date)?;
    let update = after_write(&db, &config, day(date))?;

    if human_flag {
        println!(
            "Water: {} / {} glasses",
            summary.water_glasses, summary.water_glasses_goal
        );
        print_new_rewards(&update);
    } else {
        print_ok(
            "water",
            json!({
                "date": summary.date,
                "water_glasses": summary.water_glasses,
                "water_glasses_goal": summary.water_glasses_goal,
                "progress": round2(summary.water_progress()),
                "new_rewards": update.new_rewards,
            }),
        )?;
    }
    Ok(())
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
