//! Tracing subscriber setup
//!
//! Logs go to stderr only; stdout carries command output and the stdio
//! protocol.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "NOTIFY_CHIME_LOG";

/// Default level when `NOTIFY_CHIME_LOG` is unset
pub fn default_level(verbose: bool, serving: bool) -> &'static str {
    if verbose {
        "debug"
    } else if serving {
        "info"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init_logging(verbose: bool, serving: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose, serving)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_levels() {
        assert_eq!(default_level(false, false), "warn");
        assert_eq!(default_level(false, true), "info");
        assert_eq!(default_level(true, true), "debug");
    }
}
