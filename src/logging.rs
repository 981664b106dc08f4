//! Diagnostic logging with `tracing`.
//!
//! User-facing messages go through [`crate::output`]; this layer carries
//! diagnostics to stderr. The filter comes from `RUST_LOG` when set,
//! otherwise from the `-v` count.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "autotrans=error",
        1 => "autotrans=info",
        2 => "autotrans=debug",
        _ => "autotrans=trace,reqwest=debug",
    }
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init(verbosity: u8, no_color: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(true)
        .with_level(true)
        .without_time()
        .compact();

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}
