//! Development-time tracing for debugging the workflow tool.
//!
//! Diagnostics go to stderr and are controlled by `RUST_LOG`. Product output
//! (created paths, template listings) is printed to stdout by the CLI and is
//! unaffected by the filter.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber for development logging.
///
/// Reads `RUST_LOG` env var. Defaults to `warn` if unset.
/// Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=workflow=debug workflow new aspire --name Acme --file panel --template Starter.crvt3d
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
