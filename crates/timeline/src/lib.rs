//! Location-history normalization and office-day matching.
//!
//! This crate turns Google location-history exports into office-day counts:
//!
//! - [`schema`]: detects the export layout and normalizes it into [`VisitedPlace`] records
//! - [`matcher`]: keeps records that overlap a [`TimeRange`] and lie near a reference point
//! - [`days`]: collects the distinct calendar days of those matches
//! - [`scan`]: runs all of the above over a directory of exports
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use office_days_geo::Coordinate;
//! use office_days_timeline::{DaySet, MatchQuery, TimeRange, match_places, normalize_str};
//!
//! let places = normalize_str(r#"{"timelineObjects": [{"placeVisit": {
//!     "centerLatE7": 481794935, "centerLngE7": 115858037,
//!     "duration": {"startTimestamp": "2022-01-03T08:00:00Z", "endTimestamp": "2022-01-03T17:00:00Z"}
//! }}]}"#).unwrap();
//!
//! let range = TimeRange::parse("2022-01-01", "2022-01-31", &Utc).unwrap();
//! let query = MatchQuery::new(range, Coordinate::new(48.1794935, 11.5858037), 1000.0);
//!
//! let mut days = DaySet::with_timezone(Utc);
//! match_places(&places, &query, &mut days);
//! assert_eq!(days.to_sorted_list(), vec!["2022-01-03"]);
//! ```

#![warn(clippy::all)]

pub mod days;
pub mod error;
pub mod matcher;
pub mod range;
pub mod record;
pub mod scan;
pub mod schema;

pub use days::{CalendarDay, DaySet, is_working_day};
pub use error::{Result, TimelineError, TimelineErrorCode};
pub use matcher::{FileReport, MatchCounts, MatchQuery, match_places, process_file};
pub use range::{Bound, TimeRange, parse_bound};
pub use record::{VisitedPlace, unknown_instant};
pub use scan::{FileCallback, ScanOutcome, ScanSummary, Scanner, list_files};
pub use schema::{SchemaKind, TimelineDocument, normalize_reader, normalize_str};
