use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use calorievita::core::logging;
use calorievita::models::health::SampleKind;
use calorievita::output::human;

use super::{after_write, open, print_new_rewards, print_ok};

pub fn run(kind: &str, value: f64, date: Option<NaiveDate>, human_flag: bool) -> Result<()> {
    let kind: SampleKind = kind.parse()?;
    let (config, db) = open()?;
    let (sample, summary) = logging::log_activity(&db, &config, kind, value, date)?;
    let update = after_write(&db, &config, summary.date)?;

    if human_flag {
        println!("Recorded {} {} {}", sample.value, kind.unit(), kind);
        println!("{}", human::format_summary(&summary));
        print_new_rewards(&update);
    } else {
        print_ok(
            "activity",
            json!({
                "sample": sample,
                "summary": summary,
                "new_rewards": update.new_rewards,
            }),
        )?;
    }
    Ok(())
}
