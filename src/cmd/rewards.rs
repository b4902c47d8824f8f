use anyhow::Result;
use serde_json::json;

use calorievita::core::rewards::CATALOGUE;
use calorievita::models::reward::Level;
use calorievita::output::human;

use super::{open, print_ok};

pub fn run(human_flag: bool) -> Result<()> {
    let (_config, db) = open()?;
    let progress = db.get_progress()?;

    if human_flag {
        println!("{}", human::format_progress(&progress));
    } else {
        let locked: Vec<_> = CATALOGUE
            .iter()
            .filter(|def| !progress.has_reward(def.key))
            .map(|def| json!({ "key": def.key, "title": def.title, "points": def.points }))
            .collect();
        print_ok(
            "rewards",
            json!({
                "total_points": progress.total_points,
                "level": progress.level,
                "points_to_next": Level::points_to_next(progress.total_points),
                "unlocked": progress.unlocked_rewards,
                "locked": locked,
            }),
        )?;
    }
    Ok(())
}
