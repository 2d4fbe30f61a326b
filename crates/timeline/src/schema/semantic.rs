//! The newer on-device export: `{"semanticSegments": [...]}`.
//!
//! Every segment carries its own interval; each point of its `timelinePath` becomes
//! one record sharing that interval. Visit and activity segments have no path and
//! therefore contribute nothing.

use crate::record::{VisitedPlace, unknown_instant};
use chrono::{DateTime, FixedOffset};
use office_days_geo::parse_point_or_origin;
use serde::Deserialize;

/// One entry of the `semanticSegments` array.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticSegment {
    #[serde(default)]
    pub start_time: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub end_time: Option<DateTime<FixedOffset>>,
    /// `null` points are kept and resolve to `0°, 0°` like any other unreadable point
    #[serde(default)]
    pub timeline_path: Option<Vec<Option<PathPoint>>>,
}

/// A sampled point on a segment's path, e.g. `{"point": "51.6503959°, 5.0492413°"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PathPoint {
    #[serde(default)]
    pub point: Option<String>,
}

impl SemanticSegment {
    /// Expands the segment into one record per path point, in path order.
    pub fn places(&self) -> impl Iterator<Item = VisitedPlace> + '_ {
        let start = self.start_time.unwrap_or_else(unknown_instant);
        let end = self.end_time.unwrap_or_else(unknown_instant);

        self.timeline_path
            .iter()
            .flatten()
            .map(move |p| {
                let text = p.as_ref().and_then(|p| p.point.as_deref()).unwrap_or_default();
                VisitedPlace::new(parse_point_or_origin(text), start, end)
            })
    }
}

pub(crate) fn into_places(segments: Vec<SemanticSegment>) -> Vec<VisitedPlace> {
    segments.iter().flat_map(SemanticSegment::places).collect()
}
