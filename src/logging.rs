//! Tracing subscriber setup
//!
//! Logs go to stderr so they never interleave with the form on stdout.
//! `RUST_LOG` wins over the verbosity flags.

use tracing_subscriber::EnvFilter;

use crate::cli::Verbosity;

/// Filter used when `RUST_LOG` is unset
pub fn default_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::new(format!("ispa_predict={}", verbosity.log_filter()))
}

/// Install the global subscriber; later calls are no-ops
pub fn init(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbosity)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
