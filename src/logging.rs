//! Diagnostics setup.
//!
//! Rendered output owns stdout, so log events always go to stderr. The filter
//! comes from `MDHELP_LOG` when set, otherwise from the given level.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "MDHELP_LOG";

/// Initialize the global subscriber. Later calls are no-ops.
pub fn init(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(filter(level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Map a `-v` count onto a level, keeping `fallback` when no flag was given.
pub fn level_for_verbosity(verbose: u8, fallback: &str) -> String {
    match verbose {
        0 => fallback.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}
