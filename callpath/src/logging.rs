//! Diagnostic tracing for the engine.
//!
//! Execution reports go to stdout through [`crate::report`]. Tracing is for
//! frame-by-frame diagnostics and goes to stderr, controlled by `RUST_LOG`
//! or the `-v` flag.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `verbosity` picks the level: `warn` by
/// default, `info` for `-v`, `debug` for `-vv` and above.
///
/// # Example
/// ```bash
/// RUST_LOG=callpath=debug cargo run -- 5
/// ```
pub fn init(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
