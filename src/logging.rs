//! Logging setup.
//!
//! Built once in `main` from the `--verbose` flag and installed as the
//! `tracing` subscriber. Diagnostics go to stderr so stdout carries only
//! the report. HTTP internals stay at `warn` regardless of verbosity.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::env::Env;

/// Crates whose own logging is too chatty to be useful here.
const NOISY_TARGETS: &[&str] = &["reqwest", "hyper", "hyper_util", "rustls", "h2"];

/// Explicit logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: LevelFilter,
    /// Raw `RUST_LOG` directives; replace the computed filter when set.
    pub directives: Option<String>,
}

impl LoggingConfig {
    /// `info` by default, `debug` with `--verbose`.
    pub fn from_verbosity(verbose: bool, env: &Env) -> Self {
        Self {
            level: if verbose {
                LevelFilter::DEBUG
            } else {
                LevelFilter::INFO
            },
            directives: env.non_empty("RUST_LOG"),
        }
    }

    /// Filter directives for this configuration.
    pub fn filter_directives(&self) -> String {
        if let Some(ref raw) = self.directives {
            return raw.clone();
        }
        let mut parts = vec![self.level.to_string().to_lowercase()];
        parts.extend(NOISY_TARGETS.iter().map(|t| format!("{t}=warn")));
        parts.join(",")
    }

    /// Install the global subscriber.
    ///
    /// Fails if a subscriber is already installed or the directives do
    /// not parse.
    pub fn init(&self) -> Result<(), String> {
        let filter = EnvFilter::try_new(self.filter_directives()).map_err(|e| e.to_string())?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init()
            .map_err(|e| e.to_string())
    }
}
