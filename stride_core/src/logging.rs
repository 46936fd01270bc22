//! Tracing setup for the `stride` binary.
//!
//! Diagnostics always go to stderr; stdout carries only progression elements
//! or the JSON listing.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Level used when `RUST_LOG` is unset. Truncation warnings stay visible.
pub const DEFAULT_LEVEL: &str = "warn";

/// Install the stderr subscriber at [`DEFAULT_LEVEL`].
pub fn init() {
    init_with_level(DEFAULT_LEVEL)
}

/// Install the stderr subscriber, filtering at `default_level` unless
/// `RUST_LOG` holds a valid directive.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Route `debug` events from unit tests through libtest's captured output.
/// Safe to call from every test.
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
