//! Tracing setup.
//!
//! - LOG_LEVEL: filter directives, e.g. "debug" or
//!   "info,session=debug,quiz_front=debug,tower_http=info".
//! - LOG_FORMAT: "pretty" (default), "compact", or "json".
//!
//! Targets used by this crate: `quiz_front` (server, backend client) and
//! `session` (per-page flow).

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,session=debug,quiz_front=debug,tower_http=info,axum=info";

#[derive(Debug, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Compact,
    Json,
}

fn log_format(raw: Option<&str>) -> LogFormat {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("json") => LogFormat::Json,
        Some("compact") => LogFormat::Compact,
        _ => LogFormat::Pretty,
    }
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let format = std::env::var("LOG_FORMAT").ok();
    match log_format(format.as_deref()) {
        LogFormat::Json => builder.json().init(),
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.init(),
    }
}
