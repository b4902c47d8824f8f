use chrono::NaiveDate;
use serde::Serialize;

use crate::core::streak;
use crate::models::food::{FoodEntry, Meal};
use crate::models::summary::{DailySummary, MacroBreakdown};

/// Sum the macros of a set of entries. Always recomputed from scratch.
pub fn macro_breakdown(entries: &[FoodEntry]) -> MacroBreakdown {
    entries.iter().fold(MacroBreakdown::default(), |acc, f| MacroBreakdown {
        carbs: acc.carbs + f.carbs,
        protein: acc.protein + f.protein,
        fat: acc.fat + f.fat,
        fiber: acc.fiber + f.fiber,
        sugar: acc.sugar + f.sugar,
    })
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MealTotal {
    pub meal: Meal,
    pub calories: f64,
    pub entries: usize,
}

/// Calories and entry counts per meal, in breakfast/lunch/dinner/snack order.
pub fn meal_totals(entries: &[FoodEntry]) -> Vec<MealTotal> {
    Meal::ALL
        .iter()
        .map(|meal| {
            let in_meal: Vec<&FoodEntry> = entries.iter().filter(|f| f.meal == *meal).collect();
            MealTotal {
                meal: *meal,
                calories: in_meal.iter().map(|f| f.calories).sum(),
                entries: in_meal.len(),
            }
        })
        .collect()
}

/// `value` as a percentage of `goal`, one decimal. Not clamped, so going over
/// a goal shows as more than 100.
pub fn percentage(value: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return 0.0;
    }
    (value / goal * 1000.0).round() / 10.0
}

pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Thousands-separated integer, e.g. `1234` -> `"1,234"`.
pub fn format_calories(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if n < 0 {
        out.insert(0, '-');
    }
    out
}

/// Short form for large counts, e.g. `12500` -> `"12.5k"`.
pub fn format_compact(n: i64) -> String {
    let abs = n.unsigned_abs() as f64;
    let sign = if n < 0 { "-" } else { "" };
    let (scaled, suffix) = if abs >= 1_000_000.0 {
        (abs / 1_000_000.0, "M")
    } else if abs >= 1_000.0 {
        (abs / 1_000.0, "k")
    } else {
        return n.to_string();
    };
    let rounded = (scaled * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}{}{}", sign, rounded as i64, suffix)
    } else {
        format!("{}{:.1}{}", sign, rounded, suffix)
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PeriodTotals {
    pub days: u32,
    pub calories_consumed: i64,
    pub calories_burned: i64,
    pub steps: i64,
    pub water_glasses: i64,
    pub avg_calories_consumed: f64,
    pub avg_calories_burned: f64,
    pub avg_steps: f64,
    pub avg_water_glasses: f64,
}

fn sum_saturating(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0, i64::saturating_add)
}

impl PeriodTotals {
    pub fn from_summaries(summaries: &[DailySummary]) -> Self {
        let days = summaries.len() as u32;
        let calories_consumed = sum_saturating(summaries.iter().map(|s| s.calories_consumed));
        let calories_burned = sum_saturating(summaries.iter().map(|s| s.calories_burned));
        let steps = sum_saturating(summaries.iter().map(|s| s.steps));
        let water_glasses = sum_saturating(summaries.iter().map(|s| s.water_glasses));
        let avg = |total: i64| {
            if days == 0 {
                0.0
            } else {
                round1(total as f64 / days as f64)
            }
        };
        Self {
            days,
            calories_consumed,
            calories_burned,
            steps,
            water_glasses,
            avg_calories_consumed: avg(calories_consumed),
            avg_calories_burned: avg(calories_burned),
            avg_steps: avg(steps),
            avg_water_glasses: avg(water_glasses),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PeriodReport {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub totals: PeriodTotals,
    /// Days with anything recorded at all.
    pub active_days: u32,
    pub best_steps_day: Option<NaiveDate>,
    pub days_on_calorie_target: u32,
    pub days_on_step_target: u32,
    pub days_on_water_target: u32,
    pub avg_net_calories: f64,
}

/// Summarise a window of daily summaries (expected oldest first).
pub fn period_report(summaries: &[DailySummary]) -> PeriodReport {
    let totals = PeriodTotals::from_summaries(summaries);
    let active_days = summaries.iter().filter(|s| !s.is_empty()).count() as u32;
    let best_steps_day = summaries
        .iter()
        .filter(|s| s.steps > 0)
        .max_by_key(|s| s.steps)
        .map(|s| s.date);
    let count = |f: fn(&DailySummary) -> bool| summaries.iter().filter(|s| f(s)).count() as u32;
    let nets: Vec<f64> = summaries.iter().map(|s| s.net_calories() as f64).collect();

    PeriodReport {
        from: summaries.first().map(|s| s.date),
        to: summaries.last().map(|s| s.date),
        totals,
        active_days,
        best_steps_day,
        days_on_calorie_target: count(streak::calories_met),
        days_on_step_target: count(streak::steps_met),
        days_on_water_target: count(streak::water_met),
        avg_net_calories: round1(average(&nets)),
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::Goals;

    fn food(name: &str, meal: Meal, calories: f64) -> FoodEntry {
        let mut f = FoodEntry::new(name, calories).with_macros(10.0, 5.0, 2.0);
        f.meal = meal;
        f
    }

    #[test]
    fn macro_breakdown_sums_all_entries() {
        let entries = vec![
            food("oats", Meal::Breakfast, 300.0),
            food("soup", Meal::Lunch, 200.0),
        ];
        let m = macro_breakdown(&entries);
        assert_eq!(m.carbs, 20.0);
        assert_eq!(m.protein, 10.0);
        assert_eq!(m.fat, 4.0);
    }

    #[test]
    fn meal_totals_cover_every_meal() {
        let entries = vec![
            food("oats", Meal::Breakfast, 300.0),
            food("banana", Meal::Breakfast, 100.0),
            food("chips", Meal::Snack, 150.0),
        ];
        let totals = meal_totals(&entries);
        assert_eq!(totals.len(), 4);
        assert_eq!(totals[0].calories, 400.0);
        assert_eq!(totals[0].entries, 2);
        assert_eq!(totals[1].entries, 0);
        assert_eq!(totals[3].calories, 150.0);
    }

    #[test]
    fn percentage_handles_zero_goal_and_overshoot() {
        assert_eq!(percentage(500.0, 0.0), 0.0);
        assert_eq!(percentage(2500.0, 2000.0), 125.0);
        assert_eq!(percentage(1.0, 3.0), 33.3);
    }

    #[test]
    fn format_calories_groups_thousands() {
        assert_eq!(format_calories(0), "0");
        assert_eq!(format_calories(999), "999");
        assert_eq!(format_calories(1234), "1,234");
        assert_eq!(format_calories(1_234_567), "1,234,567");
        assert_eq!(format_calories(-4321), "-4,321");
    }

    #[test]
    fn format_compact_scales() {
        assert_eq!(format_compact(950), "950");
        assert_eq!(format_compact(12_500), "12.5k");
        assert_eq!(format_compact(10_000), "10k");
        assert_eq!(format_compact(2_340_000), "2.3M");
    }

    #[test]
    fn weekly_total_matches_sum_of_days() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let consumed = [1800, 2100, 1950, 0, 2400, 1700, 2250];
        let summaries: Vec<DailySummary> = consumed
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let mut s =
                    DailySummary::zeroed(start + chrono::Duration::days(i as i64), &Goals::default());
                s.calories_consumed = *c;
                s
            })
            .collect();
        let totals = PeriodTotals::from_summaries(&summaries);
        assert_eq!(totals.calories_consumed, consumed.iter().sum::<i64>());
        assert_eq!(totals.days, 7);
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let summaries: Vec<DailySummary> = (0..2)
            .map(|i| {
                let mut s =
                    DailySummary::zeroed(start + chrono::Duration::days(i), &Goals::default());
                s.calories_consumed = i64::MAX;
                s.calories_burned = i64::MIN;
                s
            })
            .collect();
        let totals = PeriodTotals::from_summaries(&summaries);
        assert_eq!(totals.calories_consumed, i64::MAX);
        assert_eq!(totals.calories_burned, i64::MIN);
        assert_eq!(summaries[0].net_calories(), i64::MAX);
    }

    #[test]
    fn period_report_counts_targets() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let mut a = DailySummary::zeroed(start, &Goals::default());
        a.calories_consumed = 1900;
        a.steps = 12_000;
        let mut b = DailySummary::zeroed(start + chrono::Duration::days(1), &Goals::default());
        b.calories_consumed = 2600;
        b.steps = 4_000;
        b.water_glasses = 8;
        let c = DailySummary::zeroed(start + chrono::Duration::days(2), &Goals::default());

        let r = period_report(&[a, b, c]);
        assert_eq!(r.active_days, 2);
        assert_eq!(r.days_on_calorie_target, 1);
        assert_eq!(r.days_on_step_target, 1);
        assert_eq!(r.days_on_water_target, 1);
        assert_eq!(r.best_steps_day, Some(start));
        assert_eq!(r.from, Some(start));
    }

    #[test]
    fn empty_report_is_zero() {
        let r = period_report(&[]);
        assert_eq!(r.totals, PeriodTotals::default());
        assert!(r.best_steps_day.is_none());
        assert_eq!(r.avg_net_calories, 0.0);
    }
}
