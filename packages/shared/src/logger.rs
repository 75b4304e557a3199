//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Without it, the binary and the server library
/// log at `default_level` and `tower_http` at `debug`.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(bin_name, default_level)));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(true).with_target(true))
        .with(filter)
        .try_init();
}

/// Build the default filter directive. Crate targets use underscores.
fn default_directive(bin_name: &str, default_level: &str) -> String {
    let target = bin_name.replace('-', "_");
    format!("{target}={default_level},chaguan_server={default_level},tower_http=debug")
}
