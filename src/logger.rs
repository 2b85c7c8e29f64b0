//! Tracing setup.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for `name` with `default_level` unless RUST_LOG is set.
pub fn setup_logger(name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={default_level},chat_relay={default_level},tower_http=info",
            name.replace('-', "_")
        ))
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
