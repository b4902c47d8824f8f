use anyhow::Result;
use std::io::{self, Write};

use calorievita::db::Database;
use calorievita::models::config::Config;

pub fn run(skip: bool) -> Result<()> {
    let mut config = Config::load().unwrap_or_default();

    if config.aliases.is_empty() {
        config.aliases = Config::default_aliases();
    }

    if !skip {
        println!("Calorie Vita: initial setup\n");

        let name = prompt_string("Name (optional)")?;
        if !name.is_empty() {
            config.profile.name = Some(name);
        }
        config.profile.height_cm = Some(prompt_f64("Height (cm)")?);
        config.profile.weight_kg = Some(prompt_f64("Current weight (kg)")?);
        config.profile.birth_year = Some(prompt_u16("Birth year")?);
        config.profile.gender = Some(prompt_string("Gender (male/female/other)")?);

        config.goals.calories = prompt_i64("Daily calorie goal (kcal)", config.goals.calories)?;
        config.goals.steps = prompt_i64("Daily step goal", config.goals.steps)?;
        config.goals.water_glasses =
            prompt_i64("Daily water goal (glasses)", config.goals.water_glasses)?;

        config.save()?;
        Database::open(&Config::db_path())?;

        println!("\nSetup complete. Data stored in {:?}", Config::data_dir());
    } else {
        config.save()?;
        Database::open(&Config::db_path())?;
        println!("Config initialized with defaults at {:?}", Config::path());
    }

    Ok(())
}

fn prompt_string(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}

fn prompt_f64(label: &str) -> Result<f64> {
    loop {
        let s = prompt_string(label)?;
        match s.parse::<f64>() {
            Ok(v) if v > 0.0 => return Ok(v),
            _ => println!("Please enter a positive number."),
        }
    }
}

fn prompt_u16(label: &str) -> Result<u16> {
    loop {
        let s = prompt_string(label)?;
        match s.parse::<u16>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("Please enter a number."),
        }
    }
}

/// Empty input keeps the default.
fn prompt_i64(label: &str, default: i64) -> Result<i64> {
    loop {
        let s = prompt_string(&format!("{} [{}]", label, default))?;
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<i64>() {
            Ok(v) if v > 0 => return Ok(v),
            _ => println!("Please enter a positive whole number."),
        }
    }
}
