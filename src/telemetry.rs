use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `debug` or
/// `calorievita::core=debug`.
pub const LOG_ENV: &str = "CALORIEVITA_LOG";

/// Install the global subscriber. Diagnostics go to stderr so stdout only
/// ever carries command output. Safe to call more than once.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
