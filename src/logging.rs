//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The library only emits events; the binary installs the subscriber once at
//! startup. `RUST_LOG` overrides the level picked from the command line.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Maps `-v`/`-q` counts to a level. Warnings are shown by default.
#[must_use]
pub fn level_from_verbosity(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global subscriber writing compact lines to stderr.
///
/// # Panics
/// If a global subscriber is already installed.
pub fn init(level: Level) {
    tracing_subscriber::registry()
        .with(build_env_filter(level))
        .with(
            fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}

fn build_env_filter(level: Level) -> EnvFilter {
    let level = level.as_str().to_lowercase();
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,barloader_rs={level}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_from_verbosity(0, false), Level::WARN);
        assert_eq!(level_from_verbosity(2, false), Level::DEBUG);
        assert_eq!(level_from_verbosity(7, false), Level::TRACE);
        assert_eq!(level_from_verbosity(3, true), Level::ERROR);
    }
}
