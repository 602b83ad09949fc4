//! Logging setup utilities for the Parlor binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the calling crate, this shared crate and any extra
/// targets passed in. It can be overridden with the `RUST_LOG` environment
/// variable.
///
/// # Arguments
///
/// * `crate_name` - The calling crate's target name (e.g. `env!("CARGO_CRATE_NAME")`)
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
/// * `extra_targets` - Additional targets logged at the same level (e.g. "tower_http")
///
/// # Examples
///
/// ```no_run
/// use parlor_shared::logger::setup_logger;
///
/// setup_logger("parlor_server", "debug", &["tower_http"]);
/// ```
pub fn setup_logger(crate_name: &str, default_log_level: &str, extra_targets: &[&str]) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                default_filter(crate_name, default_log_level, extra_targets).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Build the default filter directive string used when `RUST_LOG` is unset.
pub fn default_filter(crate_name: &str, default_log_level: &str, extra_targets: &[&str]) -> String {
    std::iter::once(crate_name)
        .chain(std::iter::once(env!("CARGO_CRATE_NAME")))
        .chain(extra_targets.iter().copied())
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}
