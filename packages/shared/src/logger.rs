//! Logging setup utilities for the Huddle meeting application.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose log output is enabled by the default filter.
const HUDDLE_CRATES: [&str; 3] = ["huddle_shared", "huddle_server", "huddle_client"];

/// Build the default `EnvFilter` directive used when `RUST_LOG` is not set.
///
/// Every Huddle crate and the binary itself log at `default_log_level`.
pub fn default_filter_directive(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    let mut targets: Vec<&str> = HUDDLE_CRATES.to_vec();
    if !targets.contains(&binary_target.as_str()) {
        targets.push(&binary_target);
    }

    targets
        .iter()
        .map(|target| format!("{}={}", target, default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "huddle-server", "huddle-client")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use huddle_shared::logger::setup_logger;
///
/// setup_logger("huddle-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                default_filter_directive(binary_name, default_log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
