//! Logging setup for office-days
//!
//! One subscriber is built from the verbosity flag at startup and installed as the
//! process default; every component logs through `tracing` macros and attaches its
//! own context with spans (for example the file currently being matched).

use std::time::{Duration, Instant};
use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// How log output is filtered and decorated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Level used when `RUST_LOG` is unset
    pub level: LevelFilter,
    /// Prefix events with the emitting module
    pub targets: bool,
    /// Prefix events with the thread id, useful for parallel scans
    pub thread_ids: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self::from_verbosity(false)
    }
}

impl TelemetryConfig {
    /// `debug` with targets and thread ids when verbose, bare `info` otherwise
    pub fn from_verbosity(verbose: bool) -> Self {
        Self {
            level: if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO },
            targets: verbose,
            thread_ids: verbose,
        }
    }
}

/// Build the subscriber described by `config` without installing it.
///
/// `RUST_LOG` takes precedence over the configured level. Output goes to stderr so
/// stdout stays reserved for the report.
pub fn subscriber(config: &TelemetryConfig) -> impl Subscriber + Send + Sync + use<> {
    let filter = EnvFilter::builder()
        .with_default_directive(config.level.into())
        .from_env_lossy();

    let layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(config.targets)
        .with_thread_ids(config.thread_ids);

    tracing_subscriber::registry().with(filter).with(layer)
}

/// Install the subscriber as the process default. Fails if one is already set.
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    tracing::subscriber::set_global_default(subscriber(config))
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), level = %config.level, "Logging initialized");
    Ok(())
}

/// Wall-clock timer that logs its duration at debug level when stopped
#[derive(Debug)]
pub struct Timer {
    label: &'static str,
    started: Instant,
}

impl Timer {
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn stop(self) -> Duration {
        let elapsed = self.elapsed();
        tracing::debug!(operation = self.label, elapsed_ms = elapsed.as_millis() as u64, "Timer completed");
        elapsed
    }
}

/// Enter an info span named `$name` for the rest of the scope and time it
#[macro_export]
macro_rules! timed_span {
    ($name:literal $(, $($field:tt)*)?) => {
        let _timer = $crate::Timer::start($name);
        let _span = tracing::info_span!($name $(, $($field)*)?).entered();
    };
}
