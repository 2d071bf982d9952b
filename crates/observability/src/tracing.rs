//! Tracing/logging initialization.
//!
//! The catalog crates only emit events (`debug!` for generation and expansion
//! decisions, `warn!` on code-space exhaustion); hosts decide where they go.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Like [`init`], with the fallback filter used when `RUST_LOG` is unset
/// (e.g. `"archery_products=debug"`).
pub fn init_with_filter(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // JSON logs + timestamps, configurable via RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_with_filter("archery_products=debug");
        init();
        ::tracing::debug!(combinations = 6, "expanded variant selection");
    }
}
