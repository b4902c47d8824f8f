use anyhow::Result;
use rusqlite::Connection;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS food_entries (
            id         TEXT PRIMARY KEY,
            timestamp  TEXT NOT NULL,
            day        TEXT NOT NULL,
            name       TEXT NOT NULL,
            meal       TEXT NOT NULL,
            calories   REAL NOT NULL,
            carbs      REAL NOT NULL DEFAULT 0,
            protein    REAL NOT NULL DEFAULT 0,
            fat        REAL NOT NULL DEFAULT 0,
            fiber      REAL NOT NULL DEFAULT 0,
            sugar      REAL NOT NULL DEFAULT 0,
            serving    TEXT,
            note       TEXT,
            source     TEXT NOT NULL DEFAULT 'manual'
        );
        CREATE INDEX IF NOT EXISTS idx_food_day ON food_entries(day, timestamp);

        CREATE TABLE IF NOT EXISTS daily_summaries (
            date               TEXT PRIMARY KEY,
            calories_consumed  INTEGER NOT NULL DEFAULT 0,
            calories_burned    INTEGER NOT NULL DEFAULT 0,
            calories_goal      INTEGER NOT NULL,
            steps              INTEGER NOT NULL DEFAULT 0,
            steps_goal         INTEGER NOT NULL,
            water_glasses      INTEGER NOT NULL DEFAULT 0,
            water_glasses_goal INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS health_samples (
            id         TEXT PRIMARY KEY,
            timestamp  TEXT NOT NULL,
            kind       TEXT NOT NULL,
            value      REAL NOT NULL,
            start_ts   TEXT,
            end_ts     TEXT,
            source     TEXT NOT NULL DEFAULT 'manual'
        );
        CREATE INDEX IF NOT EXISTS idx_samples_kind_ts ON health_samples(kind, timestamp);

        CREATE TABLE IF NOT EXISTS goal_streaks (
            goal_type          TEXT PRIMARY KEY,
            current_streak     INTEGER NOT NULL DEFAULT 0,
            longest_streak     INTEGER NOT NULL DEFAULT 0,
            last_achieved_date TEXT,
            achieved_today     INTEGER NOT NULL DEFAULT 0,
            longest_before_run INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS rewards (
            id          TEXT PRIMARY KEY,
            key         TEXT NOT NULL UNIQUE,
            title       TEXT NOT NULL,
            description TEXT NOT NULL,
            points      INTEGER NOT NULL,
            unlocked_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS progress (
            id           INTEGER PRIMARY KEY CHECK (id = 1),
            total_points INTEGER NOT NULL DEFAULT 0
        );
        INSERT OR IGNORE INTO progress (id, total_points) VALUES (1, 0);

        CREATE TABLE IF NOT EXISTS point_awards (
            day    TEXT NOT NULL,
            reason TEXT NOT NULL,
            points INTEGER NOT NULL,
            PRIMARY KEY (day, reason)
        );",
    )?;
    Ok(())
}
