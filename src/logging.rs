//! Log subscriber setup.
//!
//! `RUST_LOG` selects what is logged; without it the service logs at `info`
//! and request traces from `tower_http` at `debug`. JSON output gives one
//! structured event per line.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,tower_http=debug";

/// Install the global subscriber. Calling this twice is harmless.
pub fn init(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if json {
        builder.json().with_current_span(false).try_init()
    } else {
        builder.with_target(false).try_init()
    };

    // Already installed (tests, repeated CLI entry)
    if let Err(e) = result {
        tracing::debug!(error = %e, "log subscriber already installed");
    }
}
