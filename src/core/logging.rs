use anyhow::Result;
use chrono::{Local, NaiveDate};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;

use crate::core::summary;
use crate::db::Database;
use crate::models::config::Config;
use crate::models::food::{FoodEntry, Meal};
use crate::models::health::{HealthSample, SampleKind, local_noon};
use crate::models::summary::DailySummary;

/// Input for logging a single food.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FoodInput {
    pub name: String,
    pub calories: f64,
    #[serde(default)]
    pub meal: Option<String>,
    #[serde(default)]
    pub carbs: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub fiber: Option<f64>,
    #[serde(default)]
    pub sugar: Option<f64>,
    #[serde(default)]
    pub serving: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl FoodInput {
    pub fn new(name: impl Into<String>, calories: f64) -> Self {
        Self {
            name: name.into(),
            calories,
            ..Default::default()
        }
    }
}

/// Upper bound for a single food entry's calories.
pub const MAX_FOOD_CALORIES: f64 = 10_000.0;
/// Upper bound for any single macro, in grams.
pub const MAX_MACRO_GRAMS: f64 = 1_000.0;
/// Largest water change accepted in one write, either direction.
pub const MAX_WATER_GLASSES: i64 = 100;

fn check_amount(field: &str, value: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        anyhow::bail!("{} must be a non-negative number, got {}", field, value);
    }
    if value > max {
        anyhow::bail!("{} must be at most {}, got {}", field, max, value);
    }
    Ok(())
}

/// Validate input and turn it into an entry, without touching the database.
fn build_entry(config: &Config, input: &FoodInput) -> Result<FoodEntry> {
    let name = input.name.trim();
    if name.is_empty() {
        anyhow::bail!("food name must not be empty");
    }
    check_amount("calories", input.calories, MAX_FOOD_CALORIES)?;
    let macros = [
        ("carbs", input.carbs),
        ("protein", input.protein),
        ("fat", input.fat),
        ("fiber", input.fiber),
        ("sugar", input.sugar),
    ];
    for (field, value) in macros {
        if let Some(v) = value {
            check_amount(field, v, MAX_MACRO_GRAMS)?;
        }
    }

    let mut f = FoodEntry::new(name, input.calories);
    if let Some(d) = input.date {
        f.timestamp = local_noon(d);
    }
    f.meal = match input.meal.as_deref() {
        Some(m) => config.resolve_alias(m).parse()?,
        None => Meal::for_timestamp(f.timestamp),
    };
    f.carbs = input.carbs.unwrap_or(0.0);
    f.protein = input.protein.unwrap_or(0.0);
    f.fat = input.fat.unwrap_or(0.0);
    f.fiber = input.fiber.unwrap_or(0.0);
    f.sugar = input.sugar.unwrap_or(0.0);
    f.serving = input.serving.clone();
    f.note = input.note.clone();
    if let Some(s) = &input.source {
        f.source = s.clone();
    }
    Ok(f)
}

fn entry_day(f: &FoodEntry) -> NaiveDate {
    f.timestamp.with_timezone(&Local).date_naive()
}

/// Log one food and refresh that day's summary.
pub fn log_food(db: &Database, config: &Config, input: &FoodInput) -> Result<FoodEntry> {
    let f = build_entry(config, input)?;
    db.insert_food(&f)?;
    summary::record_food(db, config, entry_day(&f))?;
    tracing::debug!(id = %f.id, name = %f.name, calories = f.calories, "food logged");
    Ok(f)
}

/// Log a JSON array of foods. Every entry is validated before any is stored.
pub fn log_batch(db: &Database, config: &Config, batch_json: &str) -> Result<Vec<FoodEntry>> {
    let inputs: Vec<FoodInput> = serde_json::from_str(batch_json)
        .map_err(|e| anyhow::anyhow!("invalid batch JSON: {}", e))?;

    let mut entries = Vec::with_capacity(inputs.len());
    for (i, input) in inputs.iter().enumerate() {
        let f = build_entry(config, input)
            .map_err(|e| anyhow::anyhow!("batch entry {}: {}", i, e))?;
        entries.push(f);
    }

    let mut days = BTreeSet::new();
    for f in &entries {
        db.insert_food(f)?;
        days.insert(entry_day(f));
    }
    for day in days {
        summary::record_food(db, config, day)?;
    }
    Ok(entries)
}

/// Remove a food entry and refresh its day. Returns false if it did not exist.
pub fn delete_food(db: &Database, config: &Config, id: &str) -> Result<bool> {
    let Some(f) = db.get_food(id)? else {
        return Ok(false);
    };
    db.delete_food(id)?;
    summary::record_food(db, config, entry_day(&f))?;
    Ok(true)
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuickAdd {
    pub name: String,
    pub calories: f64,
    pub carbs: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
}

impl QuickAdd {
    pub fn into_input(self) -> FoodInput {
        FoodInput {
            carbs: self.carbs,
            protein: self.protein,
            fat: self.fat,
            ..FoodInput::new(self.name, self.calories)
        }
    }
}

/// Parse `"<name> <calories>[kcal] [p:<g>] [c:<g>] [f:<g>]"`,
/// e.g. `"greek yogurt 150 p:15 c:8"`.
pub fn parse_quick_add(input: &str) -> Result<QuickAdd> {
    let re = Regex::new(
        r"^(?P<name>.+?)\s+(?P<cal>\d+(?:\.\d+)?)\s*(?:kcal|cal)?(?P<rest>(?:\s+[pcfPCF]:\d+(?:\.\d+)?)*)\s*$",
    )?;
    let caps = re.captures(input.trim()).ok_or_else(|| {
        anyhow::anyhow!(
            "cannot parse '{}' (expected NAME CALORIES [p:G] [c:G] [f:G])",
            input
        )
    })?;

    let mut q = QuickAdd {
        name: caps["name"].trim().to_string(),
        calories: caps["cal"].parse()?,
        carbs: None,
        protein: None,
        fat: None,
    };

    let macro_re = Regex::new(r"([pcfPCF]):(\d+(?:\.\d+)?)")?;
    for m in macro_re.captures_iter(&caps["rest"]) {
        let grams: f64 = m[2].parse()?;
        match m[1].to_ascii_lowercase().as_str() {
            "p" => q.protein = Some(grams),
            "c" => q.carbs = Some(grams),
            _ => q.fat = Some(grams),
        }
    }
    Ok(q)
}

/// Add glasses of water to a day (negative to correct an over-count).
pub fn log_water(
    db: &Database,
    config: &Config,
    glasses: i64,
    date: Option<NaiveDate>,
) -> Result<DailySummary> {
    if glasses == 0 {
        anyhow::bail!("glasses must not be zero");
    }
    if glasses.unsigned_abs() > MAX_WATER_GLASSES as u64 {
        anyhow::bail!(
            "glasses must be between -{0} and {0}, got {1}",
            MAX_WATER_GLASSES,
            glasses
        );
    }
    let day = date.unwrap_or_else(|| Local::now().date_naive());
    summary::add_water(db, config, day, glasses)
}

/// Record a manual activity reading for the local health bridge and refresh
/// that day's summary.
pub fn log_activity(
    db: &Database,
    config: &Config,
    kind: SampleKind,
    value: f64,
    date: Option<NaiveDate>,
) -> Result<(HealthSample, DailySummary)> {
    check_amount(&kind.to_string(), value, kind.max_value())?;
    let mut sample = match kind {
        SampleKind::Workout => {
            if value == 0.0 {
                anyhow::bail!("workout must last at least one minute");
            }
            let end = date.map(local_noon).unwrap_or_else(chrono::Utc::now);
            HealthSample::workout(end, value.round() as i64)
        }
        _ => HealthSample::new(kind, value),
    };
    if kind != SampleKind::Workout
        && let Some(d) = date
    {
        sample.timestamp = local_noon(d);
    }
    db.insert_sample(&sample)?;
    let day = sample.timestamp.with_timezone(&Local).date_naive();
    let s = summary::record_activity(db, config, day)?;
    Ok((sample, s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_add_name_and_calories() {
        let q = parse_quick_add("oatmeal 350").unwrap();
        assert_eq!(q.name, "oatmeal");
        assert_eq!(q.calories, 350.0);
        assert!(q.protein.is_none());
    }

    #[test]
    fn quick_add_multiword_with_macros() {
        let q = parse_quick_add("greek yogurt 150kcal p:15 c:8.5 F:4").unwrap();
        assert_eq!(q.name, "greek yogurt");
        assert_eq!(q.calories, 150.0);
        assert_eq!(q.protein, Some(15.0));
        assert_eq!(q.carbs, Some(8.5));
        assert_eq!(q.fat, Some(4.0));
    }

    #[test]
    fn quick_add_rejects_missing_calories() {
        assert!(parse_quick_add("banana").is_err());
        assert!(parse_quick_add("350").is_err());
    }

    #[test]
    fn build_entry_validates_amounts() {
        let config = Config::default();
        assert!(build_entry(&config, &FoodInput::new("  ", 100.0)).is_err());
        assert!(build_entry(&config, &FoodInput::new("x", -1.0)).is_err());
        assert!(build_entry(&config, &FoodInput::new("x", f64::NAN)).is_err());
        let bad_macro = FoodInput {
            fat: Some(-2.0),
            ..FoodInput::new("x", 10.0)
        };
        assert!(build_entry(&config, &bad_macro).is_err());
        assert!(build_entry(&config, &FoodInput::new("x", MAX_FOOD_CALORIES)).is_ok());
        assert!(build_entry(&config, &FoodInput::new("x", 1e300)).is_err());
        let huge_macro = FoodInput {
            carbs: Some(MAX_MACRO_GRAMS + 1.0),
            ..FoodInput::new("x", 10.0)
        };
        assert!(build_entry(&config, &huge_macro).is_err());
    }

    #[test]
    fn build_entry_resolves_meal_alias() {
        let mut config = Config::default();
        config.aliases = Config::default_aliases();
        let input = FoodInput {
            meal: Some("b".into()),
            ..FoodInput::new("eggs", 140.0)
        };
        assert_eq!(build_entry(&config, &input).unwrap().meal, Meal::Breakfast);
    }
}
