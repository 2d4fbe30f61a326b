//! Effective run settings: command line flags layered over the configuration file.

use crate::args::Cli;
use chrono::{DateTime, FixedOffset, TimeZone};
use office_days_core::config::{ConfigSchema, expand_path};
use office_days_core::error::{Error, Result};
use office_days_core::validation::Validator;
use office_days_geo::Coordinate;
use office_days_timeline::{Bound, MatchQuery, TimeRange, TimelineError, parse_bound};
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMATS: &str = "an RFC 3339 timestamp (2022-01-01T00:00:00+01:00), 2022-01-01T00:00:00 or 2022-01-01";

#[derive(Debug, Clone)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub query: MatchQuery,
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
    pub print_dates: bool,
    pub parallel: bool,
    pub progress: bool,
}

impl Settings {
    /// Merges `cli` over `config` and validates the result.
    ///
    /// Boundaries without an offset are read in `tz`. Every missing or invalid value is
    /// an error; nothing falls back to zero.
    pub fn resolve<Tz: TimeZone>(cli: &Cli, config: &ConfigSchema, tz: &Tz) -> Result<Self> {
        let input_dir = cli
            .input_dir
            .as_deref()
            .map(expand_input_dir)
            .or_else(|| config.input.dir_path())
            .ok_or_else(|| Error::missing_argument("input-dir"))?;
        let latitude = cli
            .latitude
            .or(config.location.latitude)
            .ok_or_else(|| Error::missing_argument("latitude"))?;
        let longitude = cli
            .longitude
            .or(config.location.longitude)
            .ok_or_else(|| Error::missing_argument("longitude"))?;
        let tolerance = cli.tolerance.unwrap_or(config.location.tolerance);

        let start = cli
            .start_date
            .as_deref()
            .or(config.range.start.as_deref())
            .ok_or_else(|| Error::missing_argument("start-date"))?;
        let end = cli
            .end_date
            .as_deref()
            .or(config.range.end.as_deref())
            .ok_or_else(|| Error::missing_argument("end-date"))?;

        let validation = Validator::new()
            .range("latitude", latitude, -90.0, 90.0)
            .range("longitude", longitude, -180.0, 180.0)
            .non_negative("tolerance", tolerance)
            .directory_warning("input-dir", &input_dir)
            .validate();
        for warning in validation.warnings() {
            tracing::warn!(field = %warning.field, "{}", warning.message);
        }
        validation.to_result()?;

        let range = TimeRange::new(bound("start-date", start, Bound::Start, tz)?, bound("end-date", end, Bound::End, tz)?)
            .map_err(|err| Error::validation(err.to_string()))?;

        Ok(Self {
            input_dir,
            query: MatchQuery::new(range, Coordinate::new(latitude, longitude), tolerance),
            extensions: config.input.extensions.clone(),
            exclude: config.input.exclude.clone(),
            print_dates: cli.print_dates || config.output.print_dates,
            parallel: cli.parallel || config.output.parallel,
            progress: cli.progress || config.output.progress,
        })
    }
}

fn bound<Tz: TimeZone>(flag: &str, text: &str, which: Bound, tz: &Tz) -> Result<DateTime<FixedOffset>> {
    parse_bound(text, which, tz).map_err(|err| match err {
        TimelineError::InvalidTimestamp(_) => Error::invalid_format(flag, text, TIMESTAMP_FORMATS),
        other => Error::validation(other.to_string()),
    })
}

/// `-input-dir=~/Takeout` reaches us unexpanded; treat it like a config file path.
fn expand_input_dir(dir: &Path) -> PathBuf {
    dir.to_str().map(expand_path).unwrap_or_else(|| dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use clap::Parser;
    use office_days_core::ErrorCode;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("office-days").chain(args.iter().copied())).unwrap()
    }

    fn full_args() -> Vec<&'static str> {
        vec![
            "--input-dir",
            ".",
            "--start-date",
            "2022-01-01",
            "--end-date",
            "2022-01-31",
            "--latitude",
            "48.1794935",
            "--longitude",
            "11.5858037",
        ]
    }

    fn config(toml: &str) -> ConfigSchema {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn test_cli_only() {
        let settings = Settings::resolve(&cli(&full_args()), &ConfigSchema::default(), &Utc).unwrap();

        assert_eq!(settings.input_dir, PathBuf::from("."));
        assert_eq!(settings.query.tolerance_m, 1000.0);
        assert_eq!(settings.query.reference, Coordinate::new(48.1794935, 11.5858037));
        assert_eq!(settings.query.range.start().to_rfc3339(), "2022-01-01T00:00:00+00:00");
        assert!(!settings.print_dates);
    }

    #[test]
    fn test_config_fills_gaps_and_cli_wins() {
        let config = config(
            r#"
            [location]
            latitude = 52.52
            longitude = 13.405
            tolerance = 250.0

            [input]
            dir = "/data/Takeout"

            [range]
            start = "2023-01-01"
            end = "2023-12-31"

            [output]
            print_dates = true
            "#,
        );

        let settings = Settings::resolve(&cli(&["--latitude", "48.0"]), &config, &Utc).unwrap();
        assert_eq!(settings.query.reference, Coordinate::new(48.0, 13.405));
        assert_eq!(settings.query.tolerance_m, 250.0);
        assert_eq!(settings.input_dir, PathBuf::from("/data/Takeout"));
        assert!(settings.print_dates);

        let settings = Settings::resolve(&cli(&["--tolerance", "50"]), &config, &Utc).unwrap();
        assert_eq!(settings.query.tolerance_m, 50.0);
    }

    #[test]
    fn test_missing_values_are_reported() {
        let err = Settings::resolve(&cli(&[]), &ConfigSchema::default(), &Utc).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingArgument);
        assert_eq!(err.code.exit_code(), 2);

        let mut args = full_args();
        args.truncate(8);
        let err = Settings::resolve(&cli(&args), &ConfigSchema::default(), &Utc).unwrap_err();
        assert!(err.message.contains("longitude"));
    }

    #[test]
    fn test_out_of_range_coordinate_is_rejected() {
        let mut args = full_args();
        args.extend(["--latitude", "123.0"]);
        let err = Settings::resolve(&cli(&args), &ConfigSchema::default(), &Utc).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_negative_tolerance_is_rejected() {
        let mut args = full_args();
        args.extend(["--tolerance", "-1"]);
        let err = Settings::resolve(&cli(&args), &ConfigSchema::default(), &Utc).unwrap_err();
        assert_eq!(err.code.exit_code(), 2);
    }

    #[test]
    fn test_bad_date_is_invalid_format() {
        let mut args = full_args();
        args.extend(["--start-date", "last monday"]);
        let err = Settings::resolve(&cli(&args), &ConfigSchema::default(), &Utc).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert!(err.message.contains("start-date"));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let mut args = full_args();
        args.extend(["--end-date", "2021-12-31"]);
        let err = Settings::resolve(&cli(&args), &ConfigSchema::default(), &Utc).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
