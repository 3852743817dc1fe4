//! Log filter and subscriber setup.
//!
//! Logs go to stderr; stdout is reserved for plugin output.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Targets that log on behalf of the check: this library, the binary
/// entrypoint and the database layer.
const TARGETS: &[&str] = &["querycount_check", "check_mongodb_query_count", "querycount_db"];

/// Default directives: `warn` for every check target, `debug` with `--debug`.
pub fn default_directives(debug: bool) -> String {
    let level = if debug { "debug" } else { "warn" };
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// `RUST_LOG` when set, otherwise [`default_directives`].
pub fn env_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directives(debug).into())
}

pub fn init(debug: bool) {
    tracing_subscriber::registry()
        .with(env_filter(debug))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
