//! `tracing` subscriber setup.
//!
//! The library itself only emits events; hosts (the lint runner, tests,
//! benchmarks) call [`init`] once to print them.  The filter comes from
//! the `PHPANTOM_LOG` environment variable when set, otherwise from the
//! `[log]` section of the configuration.
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV_VAR: &str = "PHPANTOM_LOG";

fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install a global fmt subscriber writing to stderr.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init(config: &LogConfig) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

/// Like [`init`], but captured by the test harness; safe to call from
/// every test.
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&LogConfig::default()))
        .with_test_writer()
        .try_init();
}
