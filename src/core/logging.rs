//! Logging setup and request-scoped logging context.
//!
//! The subscriber is configured once from `main`. Each inbound request runs
//! inside a [`REQUEST_ID`] scope so that upstream logs can be tied back to the
//! request that caused them.

use chrono::Local;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

tokio::task_local! {
    /// Task-local storage for the current request ID.
    pub static REQUEST_ID: String;
}

/// Get the current request ID from context, if set.
///
/// Returns an empty string if no request ID is set.
pub fn get_request_id() -> String {
    REQUEST_ID.try_with(|id| id.clone()).unwrap_or_default()
}

/// Generate a new unique request ID using UUID v4.
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Timestamp formatter using the local timezone (respects `TZ`).
struct LocalTime;

impl tracing_subscriber::fmt::time::FormatTime for LocalTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Build the filter directive string.
///
/// Noise suppression for the HTTP stack is always appended, otherwise a bare
/// `RUST_LOG=trace` would flood the output with hyper internals.
fn filter_directives(rust_log: Option<String>) -> String {
    let base = rust_log.unwrap_or_else(|| "info,prime_gateway=debug".to_string());
    format!("{},hyper=warn,hyper::proto=warn,h2=warn,reqwest=warn", base)
}

/// Install the global tracing subscriber.
///
/// `NO_COLOR` disables ANSI escapes (for file logging).
pub fn init_tracing() {
    let filter =
        tracing_subscriber::EnvFilter::new(filter_directives(std::env::var("RUST_LOG").ok()));
    let no_color = std::env::var("NO_COLOR").is_ok();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(LocalTime)
                .with_ansi(!no_color),
        )
        .init();
}
