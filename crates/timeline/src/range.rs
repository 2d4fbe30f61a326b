//! Inclusive time ranges and parsing of their boundaries.

use crate::error::{Result, TimelineError};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// Which end of a range a boundary describes; decides how a bare date is widened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// A bare date means its first instant
    Start,
    /// A bare date means its last instant
    End,
}

/// Formats tried for boundaries that carry no UTC offset.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a range boundary.
///
/// Accepted forms:
/// - RFC 3339 with an offset: `2022-01-01T00:00:00+01:00`
/// - A local date-time: `2022-01-01T00:00:00`, interpreted in `tz`
/// - A bare date: `2022-01-01`, widened to the start or end of that day in `tz`
pub fn parse_bound<Tz: TimeZone>(text: &str, bound: Bound, tz: &Tz) -> Result<DateTime<FixedOffset>> {
    let text = text.trim();
    let invalid = || TimelineError::InvalidTimestamp(text.to_string());

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(instant);
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().map(|date| match bound {
                Bound::Start => date.and_time(NaiveTime::MIN),
                Bound::End => date.and_time(end_of_day()),
            })
        })
        .ok_or_else(invalid)?;

    // Around DST transitions a local time can be ambiguous or missing; widen the range.
    let local = tz.from_local_datetime(&naive);
    let resolved = match bound {
        Bound::Start => local.earliest(),
        Bound::End => local.latest(),
    };

    resolved.map(|dt| dt.fixed_offset()).ok_or_else(invalid)
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN)
}

/// An inclusive span of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

impl TimeRange {
    /// Creates a range.
    ///
    /// # Errors
    /// [`TimelineError::InvalidRange`] when `start` lies after `end`.
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Result<Self> {
        if start > end {
            return Err(TimelineError::InvalidRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parses both boundaries in `tz` and builds the range.
    pub fn parse<Tz: TimeZone>(start: &str, end: &str, tz: &Tz) -> Result<Self> {
        Self::new(parse_bound(start, Bound::Start, tz)?, parse_bound(end, Bound::End, tz)?)
    }

    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    /// Whether the interval `[start, end]` touches this range.
    ///
    /// Partial overlap counts: only intervals entirely before or entirely after the
    /// range are rejected.
    #[inline]
    pub fn overlaps(&self, start: &DateTime<FixedOffset>, end: &DateTime<FixedOffset>) -> bool {
        !(*end < self.start || *start > self.end)
    }

    /// Whether a single instant lies inside the range.
    #[inline]
    pub fn contains(&self, instant: &DateTime<FixedOffset>) -> bool {
        self.overlaps(instant, instant)
    }
}
