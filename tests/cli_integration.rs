/// CLI integration tests for calorievita.
///
/// Each test spawns the compiled binary via the `assert_cmd::cargo_bin_cmd!`
/// macro and sets `CALORIEVITA_HOME` to a fresh `TempDir` so tests are fully
/// isolated from the developer's real `~/.calorievita` data.
use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const DAY: &str = "2025-09-15";

// ── helpers ──────────────────────────────────────────────────────────────────

fn cmd_in(dir: &TempDir) -> assert_cmd::Command {
    let mut c = cargo_bin_cmd!("calorievita");
    c.env("CALORIEVITA_HOME", dir.path());
    c
}

fn init_dir(dir: &TempDir) {
    cmd_in(dir).args(["init", "--skip"]).assert().success();
}

fn parse_json(output: &assert_cmd::assert::Assert) -> Value {
    let bytes = output.get_output().stdout.clone();
    serde_json::from_slice(&bytes).expect("stdout is not valid JSON")
}

fn parse_stderr_json(output: &assert_cmd::assert::Assert) -> Value {
    let bytes = output.get_output().stderr.clone();
    serde_json::from_slice(&bytes).expect("stderr is not valid JSON")
}

fn run_ok(dir: &TempDir, args: &[&str]) -> Value {
    let assert = cmd_in(dir).args(args).assert().success();
    parse_json(&assert)
}

// ── init ─────────────────────────────────────────────────────────────────────

#[test]
fn test_init_skip_creates_config_and_db() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["init", "--skip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config initialized"));

    assert!(dir.path().join("config.toml").exists());
    assert!(dir.path().join("data.db").exists());

    // Running init again should not fail
    cmd_in(&dir).args(["init", "--skip"]).assert().success();
}

// ── log ──────────────────────────────────────────────────────────────────────

#[test]
fn test_log_food_json_output() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    let json = run_ok(
        &dir,
        &["--date", DAY, "log", "oatmeal", "350", "--meal", "b", "--protein", "12"],
    );
    assert_eq!(json["status"], "ok");
    assert_eq!(json["command"], "log");
    assert_eq!(json["data"]["entry"]["name"], "oatmeal");
    assert_eq!(json["data"]["entry"]["meal"], "breakfast");
    assert_eq!(json["data"]["entry"]["calories"], 350.0);
    let rewards = json["data"]["new_rewards"].as_array().unwrap();
    assert!(rewards.iter().any(|r| r["key"] == "first_food"));
}

#[test]
fn test_log_quick_add() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    let json = run_ok(&dir, &["--date", DAY, "log", "--quick", "greek yogurt 150 p:15"]);
    assert_eq!(json["data"]["entry"]["name"], "greek yogurt");
    assert_eq!(json["data"]["entry"]["protein"], 15.0);
}

#[test]
fn test_log_batch() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    let batch = r#"[{"name":"toast","calories":120},{"name":"jam","calories":50}]"#;
    let json = run_ok(&dir, &["--date", DAY, "log", "--batch", batch]);
    assert_eq!(json["data"]["count"], 2);
}

#[test]
fn test_log_requires_calories() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    cmd_in(&dir).args(["log", "banana"]).assert().failure();
}

#[test]
fn test_log_bad_meal_reports_error_envelope() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    let assert = cmd_in(&dir)
        .args(["log", "eggs", "200", "--meal", "brunch"])
        .assert()
        .failure();
    let json = parse_stderr_json(&assert);
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"]["code"], "general_error");
}

#[test]
fn test_show_and_delete() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    let logged = run_ok(&dir, &["--date", DAY, "log", "apple", "95"]);
    let id = logged["data"]["entry"]["id"].as_str().unwrap().to_string();

    let shown = run_ok(&dir, &["--date", DAY, "show"]);
    assert_eq!(shown["data"]["count"], 1);
    assert_eq!(shown["data"]["total_calories"], 95.0);

    run_ok(&dir, &["delete", &id]);
    let shown = run_ok(&dir, &["--date", DAY, "show"]);
    assert_eq!(shown["data"]["count"], 0);

    cmd_in(&dir).args(["delete", &id]).assert().failure();
}

// ── water & activity ─────────────────────────────────────────────────────────

#[test]
fn test_water_adds_and_corrects() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    run_ok(&dir, &["--date", DAY, "water", "3"]);
    let json = run_ok(&dir, &["--date", DAY, "water", "-1"]);
    assert_eq!(json["data"]["water_glasses"], 2);
    assert_eq!(json["data"]["water_glasses_goal"], 8);
}

#[test]
fn test_activity_shows_in_summary() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    run_ok(&dir, &["--date", DAY, "activity", "steps", "7200"]);
    run_ok(&dir, &["--date", DAY, "log", "pasta", "650"]);

    let json = run_ok(&dir, &["--date", DAY, "summary"]);
    assert_eq!(json["data"]["days"], 1);
    let day = &json["data"]["summaries"][0];
    assert_eq!(day["steps"], 7200);
    assert_eq!(day["calories_consumed"], 650);
    assert_eq!(json["data"]["sources"]["store"], true);
}

#[test]
fn test_activity_rejects_unknown_kind() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    cmd_in(&dir)
        .args(["activity", "swimming", "30"])
        .assert()
        .failure();
}

// ── summary ──────────────────────────────────────────────────────────────────

#[test]
fn test_weekly_summary_totals() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    run_ok(&dir, &["--date", "2025-09-10", "log", "lunch", "700"]);
    run_ok(&dir, &["--date", "2025-09-12", "log", "lunch", "800"]);
    run_ok(&dir, &["--date", DAY, "log", "lunch", "900"]);

    let json = run_ok(&dir, &["--date", DAY, "summary", "--period", "weekly"]);
    assert_eq!(json["data"]["days"], 7);
    assert_eq!(json["data"]["summaries"].as_array().unwrap().len(), 7);
    assert_eq!(json["data"]["totals"]["calories_consumed"], 2400);
    assert_eq!(json["data"]["from"], "2025-09-09");
}

#[test]
fn test_summary_human_table() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    run_ok(&dir, &["--date", DAY, "log", "lunch", "700"]);

    cmd_in(&dir)
        .args(["--date", DAY, "summary", "--days", "3", "--human"])
        .assert()
        .success()
        .stdout(predicate::str::contains("09-15"))
        .stdout(predicate::str::contains("Total"));
}

#[test]
fn test_summary_oversized_days_reports_error_envelope() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    let assert = cmd_in(&dir)
        .args(["summary", "--days", "100000"])
        .assert()
        .failure();
    let json = parse_stderr_json(&assert);
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"]["code"], "general_error");
    assert!(json["error"]["message"].as_str().unwrap().contains("366"));
}

#[test]
fn test_absurd_inputs_report_error_envelope() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    for args in [
        vec!["water", "9223372036854775807"],
        vec!["log", "feast", "1e300"],
        vec!["activity", "steps", "1e300"],
    ] {
        let assert = cmd_in(&dir).args(&args).assert().failure();
        let json = parse_stderr_json(&assert);
        assert_eq!(json["error"]["code"], "general_error", "{args:?}");
    }

    let json = run_ok(&dir, &["--date", DAY, "show"]);
    assert_eq!(json["data"]["count"], 0);
}

#[test]
fn test_summary_invalid_period() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    cmd_in(&dir)
        .args(["summary", "--period", "yearly"])
        .assert()
        .failure();
}

// ── streaks, rewards, status ─────────────────────────────────────────────────

#[test]
fn test_streaks_after_logging() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    run_ok(&dir, &["--date", "2025-09-14", "log", "soup", "300"]);
    run_ok(&dir, &["--date", DAY, "log", "soup", "300"]);

    let json = run_ok(&dir, &["--date", DAY, "streaks"]);
    let streaks = json["data"]["streaks"].as_array().unwrap();
    let logging = streaks
        .iter()
        .find(|s| s["goal_type"] == "logging")
        .unwrap();
    assert_eq!(logging["current_streak"], 2);
    assert_eq!(logging["achieved_today"], true);
}

#[test]
fn test_check_and_rewards() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    run_ok(&dir, &["--date", DAY, "log", "salad", "400"]);
    let json = run_ok(&dir, &["--date", DAY, "check"]);
    assert_eq!(json["data"]["points_awarded"], 0);

    let json = run_ok(&dir, &["rewards"]);
    assert_eq!(json["data"]["total_points"], 30);
    assert_eq!(json["data"]["level"], "beginner");
    assert_eq!(json["data"]["points_to_next"], 70);
    assert_eq!(json["data"]["unlocked"].as_array().unwrap().len(), 1);
}

#[test]
fn test_status_human() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    run_ok(&dir, &["--date", DAY, "log", "salad", "400"]);

    cmd_in(&dir)
        .args(["--date", DAY, "status", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Calorie Vita"))
        .stdout(predicate::str::contains("kcal left today"));
}

#[test]
fn test_insights_json() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    run_ok(&dir, &["--date", DAY, "log", "burger", "2600"]);

    let json = run_ok(&dir, &["--date", DAY, "insights"]);
    let tips = json["data"]["insights"].as_array().unwrap();
    assert!(!tips.is_empty());
    assert_eq!(json["data"]["period"], "weekly");
}

// ── health ───────────────────────────────────────────────────────────────────

#[test]
fn test_health_steps_from_logged_activity() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    run_ok(&dir, &["--date", DAY, "activity", "steps", "5100"]);

    let json = run_ok(&dir, &["--date", DAY, "health", "getTodaySteps"]);
    assert_eq!(json["data"]["result"], 5100);
    assert_eq!(json["data"]["bridge"], "local");
}

#[test]
fn test_health_unknown_method() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    let assert = cmd_in(&dir)
        .args(["health", "getHeartRate"])
        .assert()
        .failure();
    let json = parse_stderr_json(&assert);
    assert_eq!(json["error"]["code"], "UNKNOWN_METHOD");
}

#[test]
fn test_health_disabled_is_unavailable() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    run_ok(&dir, &["config", "set", "health.enabled", "false"]);

    let assert = cmd_in(&dir)
        .args(["health", "getTodaySteps"])
        .assert()
        .failure();
    let json = parse_stderr_json(&assert);
    assert_eq!(json["error"]["code"], "UNAVAILABLE");
}

#[test]
fn test_health_snapshot() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    run_ok(&dir, &["--date", DAY, "activity", "weight", "79.5"]);

    let json = run_ok(&dir, &["--date", DAY, "health", "snapshot"]);
    assert_eq!(json["data"]["result"]["weight_kg"], 79.5);
    assert_eq!(json["data"]["result"]["date"], DAY);
}

// ── rebuild ──────────────────────────────────────────────────────────────────

#[test]
fn test_rebuild_range() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    run_ok(&dir, &["--date", "2025-09-14", "log", "rice", "300"]);

    let json = run_ok(&dir, &["rebuild", "--from", "2025-09-13", "--to", DAY]);
    let summaries = json["data"]["summaries"].as_array().unwrap();
    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[1]["calories_consumed"], 300);

    cmd_in(&dir)
        .args(["rebuild", "--from", DAY, "--to", "2025-09-01"])
        .assert()
        .failure();
}

// ── config ───────────────────────────────────────────────────────────────────

#[test]
fn test_config_set_goal_and_show() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    run_ok(&dir, &["config", "set", "goals.calories", "1800"]);
    let json = run_ok(&dir, &["config", "show"]);
    assert_eq!(json["data"]["config"]["goals"]["calories"], 1800);

    let json = run_ok(&dir, &["--date", DAY, "water", "1"]);
    assert_eq!(json["data"]["water_glasses_goal"], 8);
}

#[test]
fn test_config_set_rejects_bad_values() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    cmd_in(&dir)
        .args(["config", "set", "goals.steps", "-5"])
        .assert()
        .failure();
    cmd_in(&dir)
        .args(["config", "set", "nope", "1"])
        .assert()
        .failure();
}

#[test]
fn test_config_file_permissions() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(dir.path().join("config.toml"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

// ── completions ──────────────────────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("calorievita"));
}
