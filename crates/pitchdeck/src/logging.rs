//! Logging through `tracing`, written to stderr.
//!
//! The level comes from the `-v` count (`warn` by default); `-q` drops it to
//! `error`. `RUST_LOG` overrides both.

use std::io;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub with_ansi: bool,
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_ansi: true,
            with_target: false,
        }
    }
}

impl LogConfig {
    /// - 0: warn
    /// - 1 (`-v`): info
    /// - 2 (`-vv`): debug
    /// - 3+: trace
    #[must_use]
    pub fn from_verbosity(verbosity: u8, quiet: bool) -> Self {
        let level = if quiet {
            Level::ERROR
        } else {
            match verbosity {
                0 => Level::WARN,
                1 => Level::INFO,
                2 => Level::DEBUG,
                _ => Level::TRACE,
            }
        };
        Self {
            level,
            with_target: verbosity >= 2,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(config.with_target)
        .without_time();

    tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}

/// `RUST_LOG` wins; otherwise our crate logs at `level` and dependencies
/// (eframe, winit, wgpu) stay at warn.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_lowercase();
        let deps = if level == "error" { "error" } else { "warn" };
        EnvFilter::new(format!("{deps},pitchdeck={level}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(LogConfig::from_verbosity(0, false).level, Level::WARN);
        assert_eq!(LogConfig::from_verbosity(1, false).level, Level::INFO);
        assert_eq!(LogConfig::from_verbosity(2, false).level, Level::DEBUG);
        assert_eq!(LogConfig::from_verbosity(5, false).level, Level::TRACE);
    }

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(LogConfig::from_verbosity(3, true).level, Level::ERROR);
    }

    #[test]
    fn no_color_disables_ansi() {
        assert!(!LogConfig::from_verbosity(0, false).with_ansi(false).with_ansi);
    }
}
