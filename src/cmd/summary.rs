use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use calorievita::core::aggregation::{MAX_WINDOW_DAYS, Period};
use calorievita::output::human;

use super::{aggregation_service, day, open, print_ok};

pub async fn run(
    period: &str,
    days: Option<u32>,
    date: Option<NaiveDate>,
    human_flag: bool,
) -> Result<()> {
    let days = match days {
        Some(0) => anyhow::bail!("--days must be at least 1"),
        Some(n) if n > MAX_WINDOW_DAYS => {
            anyhow::bail!("--days must be at most {}, got {}", MAX_WINDOW_DAYS, n)
        }
        Some(n) => n,
        None => period.parse::<Period>()?.days(),
    };
    let (config, db) = open()?;
    let service = aggregation_service(&config, db.into_shared())
        .with_today(day(date));
    let snapshot = service.initialize(days).await;

    if human_flag {
        println!("{}", human::format_period(&snapshot));
    } else {
        print_ok(
            "summary",
            json!({
                "days": snapshot.days,
                "from": snapshot.from,
                "to": snapshot.to,
                "policy": snapshot.policy,
                "sources": {
                    "store": snapshot.store_ok,
                    "health": snapshot.bridge_ok,
                },
                "totals": snapshot.totals,
                "summaries": snapshot.summaries,
            }),
        )?;
    }
    Ok(())
}
