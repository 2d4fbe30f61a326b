//! Matching of visited places against a time range and a reference location.

use crate::days::DaySet;
use crate::error::Result;
use crate::range::TimeRange;
use crate::record::VisitedPlace;
use crate::schema::normalize_reader;
use chrono::TimeZone;
use office_days_geo::{Coordinate, haversine_distance_meters};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// What counts as "in the office".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchQuery {
    /// Only visits overlapping this range are considered
    pub range: TimeRange,
    /// The office location
    pub reference: Coordinate,
    /// Maximum great-circle distance from `reference`, in meters (inclusive)
    pub tolerance_m: f64,
}

impl MatchQuery {
    pub fn new(range: TimeRange, reference: Coordinate, tolerance_m: f64) -> Self {
        Self {
            range,
            reference,
            tolerance_m,
        }
    }

    /// Whether the visit overlaps the range at all, partially or completely.
    #[inline]
    pub fn is_candidate(&self, place: &VisitedPlace) -> bool {
        self.range.overlaps(&place.start, &place.end)
    }

    /// Whether `coordinate` lies within the tolerance of the reference.
    #[inline]
    pub fn is_within(&self, coordinate: &Coordinate) -> bool {
        haversine_distance_meters(&self.reference, coordinate) <= self.tolerance_m
    }
}

/// Tallies of one matching pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchCounts {
    /// Records whose interval overlaps the range
    pub candidates: usize,
    /// Candidates within the tolerance
    pub matches: usize,
}

/// Records the start day of every candidate within the tolerance.
///
/// Every record is examined; input order does not matter.
pub fn match_places<Tz: TimeZone>(places: &[VisitedPlace], query: &MatchQuery, days: &mut DaySet<Tz>) -> MatchCounts {
    let mut counts = MatchCounts::default();

    for place in places.iter().filter(|p| query.is_candidate(p)) {
        counts.candidates += 1;

        if query.is_within(&place.coordinate) {
            counts.matches += 1;
            if days.insert(&place.start) {
                tracing::trace!(start = %place.start, "New office day");
            }
        }
    }

    counts
}

/// Outcome of processing one export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    /// Records after normalization
    pub records: usize,
    pub candidates: usize,
    pub matches: usize,
}

/// Opens, normalizes and matches one export, adding its days to `days`.
///
/// # Errors
/// [`TimelineError::Io`](crate::TimelineError::Io) when the file cannot be opened or
/// read, [`TimelineError::Decode`](crate::TimelineError::Decode) when it is not a
/// valid export. `days` is left untouched in both cases.
pub fn process_file<Tz: TimeZone>(path: &Path, query: &MatchQuery, days: &mut DaySet<Tz>) -> Result<FileReport> {
    let _span = tracing::info_span!("file", path = %path.display()).entered();

    let reader = BufReader::new(File::open(path)?);
    let places = normalize_reader(reader)?;
    let counts = match_places(&places, query, days);

    tracing::debug!(
        "Found {} visits to places in file of which {} have been (partially) within the given time range",
        places.len(),
        counts.candidates
    );

    Ok(FileReport {
        path: path.to_path_buf(),
        records: places.len(),
        candidates: counts.candidates,
        matches: counts.matches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimelineError;
    use chrono::{DateTime, FixedOffset, Utc};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const OFFICE: Coordinate = Coordinate::new(48.1794935, 11.5858037);

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn january(tolerance_m: f64) -> MatchQuery {
        let range = TimeRange::new(ts("2022-01-01T00:00:00Z"), ts("2022-01-31T23:59:59Z")).unwrap();
        MatchQuery::new(range, OFFICE, tolerance_m)
    }

    fn place(lat: f64, lon: f64, start: &str, end: &str) -> VisitedPlace {
        VisitedPlace::new(Coordinate::new(lat, lon), ts(start), ts(end))
    }

    #[test]
    fn test_tolerance_decides_match() {
        // Roughly 1.1 km north of the office.
        let nearby = place(48.1894935, 11.5858037, "2022-01-03T08:00:00Z", "2022-01-03T17:00:00Z");

        let mut wide = DaySet::with_timezone(Utc);
        let counts = match_places(std::slice::from_ref(&nearby), &january(2000.0), &mut wide);
        assert_eq!(counts, MatchCounts { candidates: 1, matches: 1 });
        assert_eq!(wide.to_sorted_list(), vec!["2022-01-03"]);

        let mut narrow = DaySet::with_timezone(Utc);
        let counts = match_places(&[nearby], &january(100.0), &mut narrow);
        assert_eq!(counts, MatchCounts { candidates: 1, matches: 0 });
        assert!(narrow.is_empty());
    }

    #[test]
    fn test_exact_location_matches_with_zero_tolerance() {
        let exact = place(OFFICE.latitude, OFFICE.longitude, "2022-01-03T08:00:00Z", "2022-01-03T09:00:00Z");
        let mut days = DaySet::with_timezone(Utc);
        assert_eq!(match_places(&[exact], &january(0.0), &mut days).matches, 1);
    }

    #[test]
    fn test_partial_overlap_records_start_day() {
        let range = TimeRange::new(ts("2022-01-02T00:00:00Z"), ts("2022-01-02T00:00:00Z")).unwrap();
        let query = MatchQuery::new(range, OFFICE, 1000.0);
        let visit = place(OFFICE.latitude, OFFICE.longitude, "2022-01-01T00:00:00Z", "2022-01-03T00:00:00Z");

        let mut days = DaySet::with_timezone(Utc);
        let counts = match_places(&[visit], &query, &mut days);

        assert_eq!(counts.matches, 1);
        // The day recorded is the day the visit started, even outside the range.
        assert_eq!(days.to_sorted_list(), vec!["2022-01-01"]);
    }

    #[test]
    fn test_out_of_range_records_are_not_candidates() {
        let places = [
            place(OFFICE.latitude, OFFICE.longitude, "2021-12-30T08:00:00Z", "2021-12-30T17:00:00Z"),
            place(OFFICE.latitude, OFFICE.longitude, "2022-02-01T08:00:00Z", "2022-02-01T17:00:00Z"),
        ];
        let mut days = DaySet::with_timezone(Utc);
        assert_eq!(match_places(&places, &january(1000.0), &mut days), MatchCounts::default());
        assert!(days.is_empty());
    }

    #[test]
    fn test_unordered_input_is_fully_scanned() {
        let places = [
            place(OFFICE.latitude, OFFICE.longitude, "2022-01-20T08:00:00Z", "2022-01-20T17:00:00Z"),
            place(0.0, 0.0, "2021-06-01T08:00:00Z", "2021-06-01T17:00:00Z"),
            place(OFFICE.latitude, OFFICE.longitude, "2022-01-05T08:00:00Z", "2022-01-05T17:00:00Z"),
        ];
        let mut days = DaySet::with_timezone(Utc);
        let counts = match_places(&places, &january(1000.0), &mut days);
        assert_eq!(counts, MatchCounts { candidates: 2, matches: 2 });
        assert_eq!(days.to_sorted_list(), vec!["2022-01-05", "2022-01-20"]);
    }

    #[test]
    fn test_process_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"timelineObjects": [
                {{"placeVisit": {{"centerLatE7": 481794935, "centerLngE7": 115858037,
                    "duration": {{"startTimestamp": "2022-01-08T09:00:00Z", "endTimestamp": "2022-01-08T12:00:00Z"}}}}}},
                {{"placeVisit": {{"centerLatE7": 516503959, "centerLngE7": 50492413,
                    "duration": {{"startTimestamp": "2022-01-09T09:00:00Z", "endTimestamp": "2022-01-09T12:00:00Z"}}}}}}
            ]}}"#
        )
        .unwrap();

        let mut days = DaySet::with_timezone(Utc);
        let report = process_file(file.path(), &january(1000.0), &mut days).unwrap();

        assert_eq!(report.records, 2);
        assert_eq!(report.candidates, 2);
        assert_eq!(report.matches, 1);
        assert_eq!(days.to_sorted_list(), vec!["2022-01-08"]);
        assert_eq!(days.working_day_count(), 0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut days = DaySet::with_timezone(Utc);
        let err = process_file(Path::new("/nonexistent/Records.json"), &january(1000.0), &mut days).unwrap_err();
        assert!(matches!(err, TimelineError::Io(_)));
        assert!(days.is_empty());
    }

    #[test]
    fn test_invalid_json_leaves_days_untouched() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();

        let mut days = DaySet::with_timezone(Utc);
        let err = process_file(file.path(), &january(1000.0), &mut days).unwrap_err();
        assert!(matches!(err, TimelineError::Decode(_)));
        assert!(days.is_empty());
    }
}
