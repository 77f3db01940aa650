//! Tracing setup: an `EnvFilter`-driven `fmt` subscriber writing to stderr.
//!
//! Stdout is reserved for search output, so logs never interleave with
//! results piped to another program.

pub mod events;

use querytube_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g.
/// `querytube_retrieval=debug,info`.
pub const LOG_ENV_VAR: &str = "QUERYTUBE_LOG";

/// Build the filter: `QUERYTUBE_LOG` when set and valid, otherwise the
/// configured level.
pub fn build_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed, which happens when
/// tests or an embedding host set one up first.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = build_filter(config);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = if config.json_logs {
        builder
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
            .is_ok()
    } else {
        builder.compact().try_init().is_ok()
    };

    if installed {
        tracing::debug!(
            level = %config.log_level,
            json = config.json_logs,
            "tracing initialized"
        );
    }
    installed
}

/// Install a JSON subscriber with an explicit filter string (for testing or
/// embedding).
pub fn init_tracing_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}
