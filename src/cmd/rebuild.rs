use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use calorievita::core::summary;

use super::{after_write, day, open, print_ok};

pub fn run(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    date: Option<NaiveDate>,
    human_flag: bool,
) -> Result<()> {
    let (config, db) = open()?;
    let to = to.unwrap_or_else(|| day(date));
    let from = from.unwrap_or(to);
    if from > to {
        anyhow::bail!("--from {} is after --to {}", from, to);
    }

    let mut summaries = Vec::new();
    for d in from.iter_days().take_while(|d| *d <= to) {
        summaries.push(summary::rebuild(&db, &config, d)?);
        after_write(&db, &config, d)?;
    }
    tracing::info!(%from, %to, days = summaries.len(), "summaries rebuilt");

    if human_flag {
        println!("Rebuilt {} day(s) from {} to {}", summaries.len(), from, to);
    } else {
        print_ok(
            "rebuild",
            json!({ "from": from, "to": to, "summaries": summaries }),
        )?;
    }
    Ok(())
}
