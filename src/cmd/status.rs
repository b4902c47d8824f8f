use anyhow::Result;
use chrono::NaiveDate;

use calorievita::core::status;
use calorievita::output::human;

use super::{day, open, print_ok};

pub fn run(date: Option<NaiveDate>, human_flag: bool) -> Result<()> {
    let (config, db) = open()?;
    let status = status::compute(&db, &config, day(date))?;

    if human_flag {
        println!("{}", human::format_status(&status));
    } else {
        print_ok("status", serde_json::to_value(&status)?)?;
    }
    Ok(())
}
