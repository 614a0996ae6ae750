//! Diagnostic logging via `tracing`.
//!
//! User-facing output goes through `OutputContext`; this is for `WSLKIT_LOG`
//! diagnostics only and always writes to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive (e.g. `debug`,
/// `wslkit_cli=trace`).
pub const LOG_ENV: &str = "WSLKIT_LOG";

/// Install the global subscriber. Defaults to `warn` so interactive output
/// stays clean. Safe to call more than once.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
