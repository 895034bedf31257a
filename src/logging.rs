//! Diagnostic logging setup for the binary
//!
//! The library only emits `tracing` events. The subscriber writes to stderr
//! so the report on stdout is never interleaved with log lines.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Default filter for a `-v` count when `RUST_LOG` is unset
fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "srcfacts=debug",
        _ => "srcfacts=trace",
    }
}

/// Install the global subscriber. Safe to call more than once.
///
/// `RUST_LOG` wins over the verbosity flag when set.
pub fn init_tracing(verbose: u8) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
    });
}
