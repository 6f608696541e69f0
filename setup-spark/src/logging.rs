//! Step log output.
//!
//! Progress and diagnostics go to stderr through `tracing`. Stdout is left
//! for workflow commands (`::error::`, and the fallbacks used when the
//! runner's command files are not configured).

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `info` if unset, since the step log is what
/// users read when an install fails.
///
/// # Example
/// ```bash
/// RUST_LOG=setup_spark=debug setup-spark install --spark-version 3.5.0
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
