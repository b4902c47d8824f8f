use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub goals: Goals,
    #[serde(default)]
    pub health: HealthSettings,
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Profile {
    pub name: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub birth_year: Option<u16>,
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goals {
    #[serde(default = "default_calories")]
    pub calories: i64,
    #[serde(default = "default_steps")]
    pub steps: i64,
    #[serde(default = "default_water_glasses")]
    pub water_glasses: i64,
    #[serde(default = "default_exercise_minutes")]
    pub exercise_minutes: i64,
}

fn default_calories() -> i64 {
    2000
}
fn default_steps() -> i64 {
    10_000
}
fn default_water_glasses() -> i64 {
    8
}
fn default_exercise_minutes() -> i64 {
    30
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            calories: default_calories(),
            steps: default_steps(),
            water_glasses: default_water_glasses(),
            exercise_minutes: default_exercise_minutes(),
        }
    }
}

/// How the aggregation service reconciles the summary store with the health
/// bridge for activity figures (steps, calories burned).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Take whichever source reports the larger value.
    #[default]
    PreferLarger,
    StoreOnly,
    BridgeOnly,
}

impl std::fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PreferLarger => write!(f, "prefer_larger"),
            Self::StoreOnly => write!(f, "store_only"),
            Self::BridgeOnly => write!(f, "bridge_only"),
        }
    }
}

impl FromStr for MergePolicy {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "prefer_larger" => Ok(Self::PreferLarger),
            "store_only" => Ok(Self::StoreOnly),
            "bridge_only" => Ok(Self::BridgeOnly),
            _ => anyhow::bail!(
                "invalid merge policy: {} (expected prefer_larger/store_only/bridge_only)",
                s
            ),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub merge_policy: MergePolicy,
}

fn default_enabled() -> bool {
    true
}
fn default_timeout_ms() -> u64 {
    3000
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            timeout_ms: default_timeout_ms(),
            merge_policy: MergePolicy::default(),
        }
    }
}

impl Config {
    /// Load config from the standard path, or return defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the standard path.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700))?;
            }
        }
        let contents = toml::to_string_pretty(self)?;

        #[cfg(unix)]
        {
            use std::fs::{self, OpenOptions};
            use std::io::Write;
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

            let mut options = OpenOptions::new();
            options.write(true).create(true).truncate(true).mode(0o600);
            let mut file = options.open(&path)?;

            file.write_all(contents.as_bytes())?;

            // mode() only applies on create; fix up files that already existed
            let mut perms = file.metadata()?.permissions();
            if perms.mode() & 0o777 != 0o600 {
                perms.set_mode(0o600);
                fs::set_permissions(&path, perms)?;
            }
        }
        #[cfg(not(unix))]
        {
            std::fs::write(&path, contents)?;
        }

        Ok(())
    }

    /// Resolve a meal alias, or return the input unchanged.
    pub fn resolve_alias(&self, input: &str) -> String {
        self.aliases
            .get(input)
            .cloned()
            .unwrap_or_else(|| input.to_string())
    }

    pub fn default_aliases() -> HashMap<String, String> {
        let mut m = HashMap::new();
        m.insert("b".into(), "breakfast".into());
        m.insert("bf".into(), "breakfast".into());
        m.insert("l".into(), "lunch".into());
        m.insert("d".into(), "dinner".into());
        m.insert("s".into(), "snack".into());
        m
    }

    /// Apply a `config set` style key/value pair.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "name" => self.profile.name = Some(value.to_string()),
            "height" => self.profile.height_cm = Some(value.parse()?),
            "weight" => self.profile.weight_kg = Some(value.parse()?),
            "birth_year" => self.profile.birth_year = Some(value.parse()?),
            "gender" => self.profile.gender = Some(value.to_string()),
            "goals.calories" => self.goals.calories = parse_positive(key, value)?,
            "goals.steps" => self.goals.steps = parse_positive(key, value)?,
            "goals.water_glasses" => self.goals.water_glasses = parse_positive(key, value)?,
            "goals.exercise_minutes" => self.goals.exercise_minutes = parse_positive(key, value)?,
            "health.enabled" => self.health.enabled = value.parse()?,
            "health.timeout_ms" => self.health.timeout_ms = value.parse()?,
            "health.merge_policy" => self.health.merge_policy = value.parse()?,
            k if k.starts_with("alias.") => {
                let alias = &k["alias.".len()..];
                if alias.is_empty() {
                    anyhow::bail!("alias name must not be empty");
                }
                self.aliases.insert(alias.to_string(), value.to_string());
            }
            _ => anyhow::bail!("unknown config key: {}", key),
        }
        Ok(())
    }

    pub fn data_dir() -> PathBuf {
        if let Ok(home) = std::env::var("CALORIEVITA_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".calorievita")
    }

    pub fn path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    pub fn db_path() -> PathBuf {
        Self::data_dir().join("data.db")
    }
}

fn parse_positive(key: &str, value: &str) -> anyhow::Result<i64> {
    let n: i64 = value
        .parse()
        .map_err(|_| anyhow::anyhow!("{} must be a whole number, got {}", key, value))?;
    if n <= 0 {
        anyhow::bail!("{} must be positive, got {}", key, n);
    }
    Ok(n)
}
