//! Command line definition.

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Count the days you have been in the office from your Google location history
#[derive(Parser, Debug)]
#[command(name = "office-days")]
#[command(author, version, about, long_about = None)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Directory holding the location history export (searched recursively)
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Start of the time range, e.g. 2022-01-01T00:00:00+01:00 or 2022-01-01
    #[arg(long, value_name = "TIMESTAMP")]
    pub start_date: Option<String>,

    /// End of the time range (inclusive)
    #[arg(long, value_name = "TIMESTAMP")]
    pub end_date: Option<String>,

    /// Latitude of the office
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Longitude of the office
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Maximum distance from the office in meters [default: 1000]
    #[arg(long, allow_negative_numbers = true)]
    pub tolerance: Option<f64>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print every matched date
    #[arg(long)]
    pub print_dates: bool,

    /// Process files in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Show a progress bar on stderr
    #[arg(long)]
    pub progress: bool,

    /// Configuration file (default: .office-days.toml, then the user config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parses the process arguments, accepting `-flag` as well as `--flag`.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_go_style_args(std::env::args_os()))
    }
}

/// Rewrites single-dash long flags (`-input-dir`, `-tolerance=50`) to `--input-dir`.
///
/// Short flags (`-v`), negative numbers (`-33.86`) and everything after `--` are left
/// alone. The first argument is the program name and is never touched.
pub fn normalize_go_style_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(index, arg)| {
            if index == 0 || passthrough {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                return arg;
            }
            match arg.to_str() {
                Some(text) if is_single_dash_long_flag(text) => OsString::from(format!("-{text}")),
                _ => arg,
            }
        })
        .collect()
}

fn is_single_dash_long_flag(arg: &str) -> bool {
    let mut chars = arg.chars();
    chars.next() == Some('-')
        && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.next().is_some_and(|c| c != '=')
}
