//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// `[location]`: office coordinates and tolerance
    #[serde(default)]
    pub location: LocationConfig,

    /// `[input]`: export directory and file filters
    #[serde(default)]
    pub input: InputConfig,

    /// `[range]`: start and end of the time range
    #[serde(default)]
    pub range: RangeConfig,

    /// `[output]`: report and scan switches
    #[serde(default)]
    pub output: OutputConfig,
}

/// Reference point and radius
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Latitude of the office, decimal degrees
    pub latitude: Option<f64>,

    /// Longitude of the office, decimal degrees
    pub longitude: Option<f64>,

    /// Radius around the office in meters
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            tolerance: default_tolerance(),
        }
    }
}

/// Default matching radius in meters
pub fn default_tolerance() -> f64 {
    1000.0
}

/// Where to look for export files
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InputConfig {
    /// Root directory of the export; `~` is expanded
    pub dir: Option<String>,

    /// Only scan files with these extensions (all files when empty)
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Glob patterns of paths to skip
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl InputConfig {
    /// The configured directory with `~` and environment variables expanded
    pub fn dir_path(&self) -> Option<PathBuf> {
        self.dir.as_deref().map(expand_path)
    }
}

/// Default time range, same formats as the command line flags
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RangeConfig {
    /// Inclusive start
    pub start: Option<String>,
    /// Inclusive end
    pub end: Option<String>,
}

/// Output switches
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Print every matched date
    #[serde(default)]
    pub print_dates: bool,

    /// Process files in parallel
    #[serde(default)]
    pub parallel: bool,

    /// Show a progress bar on stderr
    #[serde(default)]
    pub progress: bool,
}

/// Expands `~` and `$VAR` in a path, leaving it untouched when expansion fails
pub fn expand_path(raw: &str) -> PathBuf {
    shellexpand::full(raw)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .unwrap_or_else(|_| PathBuf::from(raw))
}
