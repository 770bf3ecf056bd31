//! Logging Infrastructure

use tracing_subscriber::EnvFilter;

/// Initialize the logger from `HEALTH_LOG_LEVEL` (default `info`)
pub fn init_logger() {
    let level = std::env::var("HEALTH_LOG_LEVEL").ok();
    init_logger_with_level(level.as_deref(), false);
}

/// Initialize the logger with an explicit filter directive.
///
/// Accepts anything `EnvFilter` understands (`debug`,
/// `health_client=trace,reqwest=warn`, ...); an invalid directive falls
/// back to `info`.
pub fn init_logger_with_level(level: Option<&str>, json: bool) {
    let filter = level
        .and_then(|l| EnvFilter::try_new(l).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
