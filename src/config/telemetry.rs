//! Tracing subscriber installation.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Safe to call
/// more than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// Installs a JSON-formatted subscriber for structured log shipping.
pub fn init_json() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().json().with_env_filter(filter).try_init();
}
