use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use crate::core::analytics::{PeriodReport, format_calories};
use crate::models::config::Goals;
use crate::models::summary::MacroBreakdown;

pub const NO_INSIGHTS: &str = "No insights yet. Keep logging meals and activity to get tips.";

/// Produces short text tips from a period report.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(
        &self,
        report: &PeriodReport,
        macros: &MacroBreakdown,
        goals: &Goals,
    ) -> Result<Vec<String>>;
}

/// Local, deterministic tips derived from averages and goal hit rates.
pub struct RuleBasedInsights;

#[async_trait]
impl InsightGenerator for RuleBasedInsights {
    fn name(&self) -> &'static str {
        "rules"
    }

    async fn generate(
        &self,
        report: &PeriodReport,
        macros: &MacroBreakdown,
        goals: &Goals,
    ) -> Result<Vec<String>> {
        if report.active_days == 0 {
            anyhow::bail!("no recorded days in period");
        }
        let t = &report.totals;
        let mut tips = Vec::new();

        let goal = goals.calories as f64;
        if t.avg_calories_consumed > goal * 1.1 {
            tips.push(format!(
                "You're averaging {} kcal a day, {} over your {} kcal goal.",
                format_calories(t.avg_calories_consumed.round() as i64),
                format_calories((t.avg_calories_consumed - goal).round() as i64),
                format_calories(goals.calories),
            ));
        } else if t.avg_calories_consumed > 0.0 && t.avg_calories_consumed < goal * 0.7 {
            tips.push(format!(
                "You're averaging only {} kcal a day. Make sure you're logging every meal.",
                format_calories(t.avg_calories_consumed.round() as i64),
            ));
        }

        if report.days_on_calorie_target > 0 {
            tips.push(format!(
                "You stayed within your calorie goal on {} of {} days.",
                report.days_on_calorie_target, t.days
            ));
        }

        let steps_goal = goals.steps as f64;
        if t.avg_steps > 0.0 && t.avg_steps < steps_goal {
            tips.push(format!(
                "You're {} steps a day short of your goal on average.",
                format_calories((steps_goal - t.avg_steps).round() as i64),
            ));
        }
        if let Some(best) = report.best_steps_day {
            tips.push(format!("Your most active day was {}.", best.format("%A, %b %-d")));
        }

        if t.days > 0 && report.days_on_water_target * 2 < t.days {
            tips.push(format!(
                "Hydration: you hit {} glasses on {} of {} days.",
                goals.water_glasses, report.days_on_water_target, t.days
            ));
        }

        let pct = macros.percentages();
        if macros.total_grams() > 0.0 && pct.protein < 15.0 {
            tips.push(format!(
                "Protein is {:.0}% of your macro calories. Aim for at least 15%.",
                pct.protein
            ));
        }

        Ok(tips)
    }
}

/// Run a generator under a time limit. Failures and empty results fall back
/// to [`NO_INSIGHTS`].
pub async fn insights_or_default(
    generator: &dyn InsightGenerator,
    report: &PeriodReport,
    macros: &MacroBreakdown,
    goals: &Goals,
    timeout: Duration,
) -> Vec<String> {
    match tokio::time::timeout(timeout, generator.generate(report, macros, goals)).await {
        Ok(Ok(tips)) if !tips.is_empty() => tips,
        Ok(Ok(_)) => vec![NO_INSIGHTS.to_string()],
        Ok(Err(e)) => {
            warn!(generator = generator.name(), error = %e, "insight generation failed");
            vec![NO_INSIGHTS.to_string()]
        }
        Err(_) => {
            warn!(
                generator = generator.name(),
                timeout_ms = timeout.as_millis() as u64,
                "insight generation timed out"
            );
            vec![NO_INSIGHTS.to_string()]
        }
    }
}
