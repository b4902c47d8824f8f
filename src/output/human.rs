use colored::Colorize;
use comfy_table::{Table, presets::UTF8_FULL};

use crate::core::aggregation::AggregateSnapshot;
use crate::core::analytics::{format_calories, format_compact, percentage};
use crate::core::status::StatusData;
use crate::models::config::MergePolicy;
use crate::models::food::FoodEntry;
use crate::models::reward::{Level, UserProgress};
use crate::models::streak::GoalStreak;
use crate::models::summary::DailySummary;

/// One food entry on a single line.
pub fn format_food(f: &FoodEntry) -> String {
    let ts = f.timestamp.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M");
    let mut line = format!("{} | {:<9} | {} = {} kcal", ts, f.meal, f.name, f.calories);
    if f.total_macros() > 0.0 {
        line.push_str(&format!(
            "  (C {:.0}g / P {:.0}g / F {:.0}g)",
            f.carbs, f.protein, f.fat
        ));
    }
    if let Some(ref serving) = f.serving {
        line.push_str(&format!("  [{}]", serving));
    }
    if let Some(ref note) = f.note {
        line.push_str(&format!("  # {}", note));
    }
    line
}

fn bar(progress: f64) -> String {
    let filled = (progress.clamp(0.0, 1.0) * 20.0).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(20 - filled))
}

pub fn format_summary(s: &DailySummary) -> String {
    let mut out = format!("--- {} ---\n", s.date);
    out.push_str(&format!(
        "Calories: {} / {} kcal {} {}%\n",
        format_calories(s.calories_consumed),
        format_calories(s.calories_goal),
        bar(s.calorie_progress()),
        percentage(s.calories_consumed as f64, s.calories_goal as f64)
    ));
    out.push_str(&format!(
        "Burned:   {} kcal (net {})\n",
        format_calories(s.calories_burned),
        format_calories(s.net_calories())
    ));
    out.push_str(&format!(
        "Steps:    {} / {} {}\n",
        format_calories(s.steps),
        format_compact(s.steps_goal),
        bar(s.steps_progress())
    ));
    out.push_str(&format!(
        "Water:    {} / {} glasses {}",
        s.water_glasses,
        s.water_glasses_goal,
        bar(s.water_progress())
    ));
    out
}

/// Table of every day in an aggregate window plus a totals row.
pub fn format_period(snapshot: &AggregateSnapshot) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Date", "Eaten", "Burned", "Net", "Steps", "Water"]);
    for s in &snapshot.summaries {
        table.add_row(vec![
            s.date.format("%a %m-%d").to_string(),
            format_calories(s.calories_consumed),
            format_calories(s.calories_burned),
            format_calories(s.net_calories()),
            format_calories(s.steps),
            format!("{}/{}", s.water_glasses, s.water_glasses_goal),
        ]);
    }
    let t = &snapshot.totals;
    table.add_row(vec![
        "Total".to_string(),
        format_calories(t.calories_consumed),
        format_calories(t.calories_burned),
        format_calories(t.calories_consumed.saturating_sub(t.calories_burned)),
        format_compact(t.steps),
        t.water_glasses.to_string(),
    ]);
    table.add_row(vec![
        "Daily avg".to_string(),
        format!("{:.0}", t.avg_calories_consumed),
        format!("{:.0}", t.avg_calories_burned),
        format!("{:.0}", t.avg_calories_consumed - t.avg_calories_burned),
        format!("{:.0}", t.avg_steps),
        format!("{:.1}", t.avg_water_glasses),
    ]);

    let mut out = table.to_string();
    let bridge_missing = !snapshot.bridge_ok && snapshot.policy != MergePolicy::StoreOnly;
    if !snapshot.store_ok || bridge_missing {
        out.push_str(&format!(
            "\n{}",
            "Some data sources were unavailable; missing values shown as 0.".yellow()
        ));
    }
    out
}

pub fn format_streak(s: &GoalStreak) -> String {
    let mark = if s.achieved_today {
        "done".green().to_string()
    } else {
        "....".dimmed().to_string()
    };
    let count = if s.current_streak > 0 {
        format!("{} day(s)", s.current_streak).bold().to_string()
    } else {
        "0 days".to_string()
    };
    format!(
        "[{}] {:<14} {} (best {})",
        mark,
        s.goal_type.title(),
        count,
        s.longest_streak
    )
}

pub fn format_progress(p: &UserProgress) -> String {
    let mut out = format!(
        "Level: {} | {} points",
        p.level.to_string().cyan().bold(),
        format_calories(p.total_points as i64)
    );
    if let Some(remaining) = Level::points_to_next(p.total_points) {
        out.push_str(&format!(" | {} to next level", remaining));
    }
    if p.unlocked_rewards.is_empty() {
        out.push_str("\nNo rewards unlocked yet.");
    } else {
        for r in &p.unlocked_rewards {
            out.push_str(&format!(
                "\n  {} {} (+{}) {}",
                "*".yellow(),
                r.title.bold(),
                r.points,
                r.description.dimmed()
            ));
        }
    }
    out
}

/// Pretty-print the status overview.
pub fn format_status(s: &StatusData) -> String {
    let mut out = format!("=== Calorie Vita: {} ===\n\n", s.date);
    out.push_str(&format_summary(&s.summary));

    let remaining = s.calories_remaining;
    if remaining >= 0 {
        out.push_str(&format!("\n{} kcal left today", format_calories(remaining)));
    } else {
        out.push_str(&format!(
            "\n{}",
            format!("{} kcal over goal", format_calories(-remaining)).red()
        ));
    }

    if s.macros.total_grams() > 0.0 {
        out.push_str(&format!(
            "\nMacros: carbs {:.0}g ({}%), protein {:.0}g ({}%), fat {:.0}g ({}%)",
            s.macros.carbs,
            s.macro_percentages.carbs,
            s.macros.protein,
            s.macro_percentages.protein,
            s.macros.fat,
            s.macro_percentages.fat
        ));
    }

    let meals: Vec<String> = s
        .meals
        .iter()
        .filter(|m| m.entries > 0)
        .map(|m| format!("{} {:.0}", m.meal, m.calories))
        .collect();
    if meals.is_empty() {
        out.push_str("\nNo food logged today.");
    } else {
        out.push_str(&format!("\nMeals: {}", meals.join(", ")));
    }

    if s.logging_days > 0 {
        out.push_str(&format!("\nLogging streak: {} day(s)", s.logging_days));
    }
    for streak in s.streaks.iter().filter(|st| st.current_streak > 0) {
        out.push_str(&format!("\n{}", format_streak(streak)));
    }

    out.push_str(&format!(
        "\nLevel: {} ({} pts, {} reward(s))",
        s.progress.level, s.progress.total_points, s.progress.rewards_unlocked
    ));
    out
}
