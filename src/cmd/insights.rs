use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use calorievita::core::aggregation::Period;
use calorievita::core::analytics;
use calorievita::core::insights::{RuleBasedInsights, insights_or_default};

use super::{aggregation_service, bridge_timeout, day, open, print_ok};

pub async fn run(period: &str, date: Option<NaiveDate>, human_flag: bool) -> Result<()> {
    let period: Period = period.parse()?;
    let (config, db) = open()?;
    let to = day(date);
    let db = db.into_shared();

    let service = aggregation_service(&config, db.clone()).with_today(to);
    let snapshot = service.initialize(period.days()).await;
    let report = analytics::period_report(&snapshot.summaries);

    let foods = {
        let db = db
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))?;
        db.foods_in_range(snapshot.from.unwrap_or(to), to)?
    };
    let macros = analytics::macro_breakdown(&foods);

    let tips = insights_or_default(
        &RuleBasedInsights,
        &report,
        &macros,
        &config.goals,
        bridge_timeout(&config),
    )
    .await;

    if human_flag {
        println!("Insights ({}, {} to {})", period, report.from.unwrap_or(to), to);
        for tip in &tips {
            println!("  - {}", tip);
        }
    } else {
        print_ok(
            "insights",
            json!({
                "period": period.to_string(),
                "report": report,
                "macros": macros,
                "insights": tips,
            }),
        )?;
    }
    Ok(())
}
