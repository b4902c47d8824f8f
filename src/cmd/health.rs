use anyhow::Result;
use chrono::NaiveDate;
use serde_json::{Value, json};

use calorievita::health::channel::{self, MethodCall};
use calorievita::health::{
    BridgeError, ErrorCode, FailSafeBridge, HealthBridge, LocalHealthBridge, UnavailableBridge,
    fitness_snapshot,
};

use super::{bridge_timeout, day, open, print_ok};

/// `snapshot` is handled here; every other name goes through the method channel.
pub async fn run(
    method: &str,
    args: Option<&str>,
    date: Option<NaiveDate>,
    human_flag: bool,
) -> Result<()> {
    let (config, db) = open()?;
    let local = LocalHealthBridge::new(db.into_shared());

    if method == "snapshot" {
        let bridge = FailSafeBridge::new(local, bridge_timeout(&config));
        let snapshot = fitness_snapshot(&bridge, day(date)).await;
        if human_flag {
            println!(
                "{}: {} steps, {:.0} kcal burned, {:.2} km",
                snapshot.date, snapshot.steps, snapshot.calories_burned, snapshot.distance_km
            );
            if let Some(w) = snapshot.weight_kg {
                println!("Weight: {:.1} kg", w);
            }
        } else {
            print_ok("health", json!({ "method": method, "result": snapshot }))?;
        }
        return Ok(());
    }

    let mut call_args = match args {
        Some(raw) => serde_json::from_str::<Value>(raw)
            .map_err(|e| anyhow::anyhow!("invalid --args JSON: {}", e))?,
        None => Value::Object(Default::default()),
    };
    if let (Some(d), Value::Object(map)) = (date, &mut call_args) {
        map.entry("date").or_insert_with(|| json!(d.to_string()));
    }
    let call = MethodCall::new(method).with_args(call_args);

    let bridge: Box<dyn HealthBridge> = if config.health.enabled {
        Box::new(local)
    } else {
        Box::new(UnavailableBridge)
    };
    let result = tokio::time::timeout(bridge_timeout(&config), channel::dispatch(&*bridge, &call))
        .await
        .map_err(|_| {
            BridgeError::new(
                ErrorCode::Timeout,
                format!("{} did not answer in time", method),
            )
        })??;

    if human_flag {
        match &result {
            Value::Object(map) => {
                for (k, v) in map {
                    println!("{}: {}", k, v);
                }
            }
            other => println!("{}: {}", method, other),
        }
    } else {
        print_ok(
            "health",
            json!({ "method": method, "bridge": bridge.name(), "result": result }),
        )?;
    }
    Ok(())
}
