//! Log setup for the binary.
//!
//! Everything goes to stderr: stdout is reserved for `--dry-run` and
//! `--check` reports.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Default level for the `-v` flag when `RUST_LOG` is unset.
pub fn default_level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Install the global subscriber. Returns `false` if one was already set.
pub fn init(level: Level, json: bool) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let text = (!json).then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));
    let json = json.then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_selects_debug() {
        assert_eq!(default_level(true), Level::DEBUG);
        assert_eq!(default_level(false), Level::INFO);
    }

    #[test]
    fn test_second_init_is_refused() {
        init(Level::INFO, false);
        assert!(!init(Level::DEBUG, true));
        tracing::debug!("still logging");
    }
}
