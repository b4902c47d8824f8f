use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(
    name = "calorievita",
    version,
    about = "Calorie, activity and goal tracking with streaks and rewards"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as human-readable text instead of JSON
    #[arg(long = "human", short = 'H', global = true)]
    pub human: bool,

    /// Override date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize profile, goals and data directory
    Init {
        /// Skip interactive setup, use defaults
        #[arg(long)]
        skip: bool,
    },

    /// Log a food entry
    Log {
        /// Food name
        #[arg(required_unless_present_any = ["batch", "quick"])]
        name: Option<String>,

        /// Calories (kcal)
        #[arg(required_unless_present_any = ["batch", "quick"])]
        calories: Option<f64>,

        /// Meal (breakfast/lunch/dinner/snack) or alias
        #[arg(long, short = 'm')]
        meal: Option<String>,

        /// Carbohydrates in grams
        #[arg(long)]
        carbs: Option<f64>,

        /// Protein in grams
        #[arg(long)]
        protein: Option<f64>,

        /// Fat in grams
        #[arg(long)]
        fat: Option<f64>,

        /// Fiber in grams
        #[arg(long)]
        fiber: Option<f64>,

        /// Sugar in grams
        #[arg(long)]
        sugar: Option<f64>,

        /// Serving description (e.g. "1 cup")
        #[arg(long)]
        serving: Option<String>,

        /// Free-text note
        #[arg(long)]
        note: Option<String>,

        /// Data source (default: manual)
        #[arg(long)]
        source: Option<String>,

        /// Quick add: "NAME CALORIES [p:G] [c:G] [f:G]"
        #[arg(long, conflicts_with = "batch")]
        quick: Option<String>,

        /// Batch JSON array of food entries
        #[arg(long)]
        batch: Option<String>,
    },

    /// Delete a food entry by id
    Delete {
        id: String,
    },

    /// Log glasses of water (negative to correct)
    Water {
        #[arg(default_value_t = 1, allow_hyphen_values = true)]
        glasses: i64,
    },

    /// Log an activity reading (steps, calories_burned, workout, distance, weight)
    Activity {
        kind: String,
        value: f64,
    },

    /// Show food entries for a day or a date range
    Show {
        /// First day of the range
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day of the range
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Aggregated summary over a period
    Summary {
        /// daily, weekly or monthly
        #[arg(long, short = 'p', default_value = "daily")]
        period: String,

        /// Custom window length in days (overrides --period)
        #[arg(long)]
        days: Option<u32>,
    },

    /// Show goal streaks
    Streaks,

    /// Evaluate goals for the day and update streaks and rewards
    Check,

    /// Show points, level and unlocked rewards
    Rewards,

    /// Quick status overview
    Status,

    /// Tips based on recent data
    Insights {
        /// daily, weekly or monthly
        #[arg(long, short = 'p', default_value = "weekly")]
        period: String,
    },

    /// Call a health bridge method (e.g. getTodayData)
    Health {
        method: String,

        /// JSON object of method arguments
        #[arg(long)]
        args: Option<String>,
    },

    /// Recompute stored daily summaries from raw entries
    Rebuild {
        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a config value
    Set {
        /// Config key (e.g. goals.calories, health.merge_policy, alias.b)
        key: String,
        /// Config value
        value: String,
    },
}
