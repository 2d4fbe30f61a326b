//! The canonical visited-place record every schema is normalized into.

use chrono::{DateTime, FixedOffset, Utc};
use office_days_geo::Coordinate;

/// Seconds from the Unix epoch back to 0001-01-01T00:00:00Z.
const YEAR_ONE_UNIX_SECS: i64 = -62_135_596_800;

/// Stand-in for a timestamp the export did not carry.
///
/// Year one lies before any real range, so a record missing its end can never
/// overlap a query.
pub fn unknown_instant() -> DateTime<FixedOffset> {
    DateTime::<Utc>::from_timestamp(YEAR_ONE_UNIX_SECS, 0)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
        .fixed_offset()
}

/// One location observation with the interval during which it was visited.
///
/// `start <= end` is expected but not enforced; malformed exports may violate it.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitedPlace {
    /// Where the visit happened
    pub coordinate: Coordinate,
    /// Start of the visit
    pub start: DateTime<FixedOffset>,
    /// End of the visit
    pub end: DateTime<FixedOffset>,
}

impl VisitedPlace {
    /// Creates a record.
    pub fn new(coordinate: Coordinate, start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self { coordinate, start, end }
    }

    /// Latitude in decimal degrees.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.coordinate.latitude
    }

    /// Longitude in decimal degrees.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.coordinate.longitude
    }
}
