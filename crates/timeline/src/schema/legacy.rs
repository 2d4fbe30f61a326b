//! The older Takeout export: `{"timelineObjects": [{"placeVisit": {...}}, {"activitySegment": {...}}]}`.
//!
//! Coordinates are E7 integers. Exports written after early 2024 dropped the
//! `centerLatE7`/`centerLngE7` pair, so the visit's `location` is used instead.

use crate::record::{VisitedPlace, unknown_instant};
use chrono::{DateTime, FixedOffset};
use office_days_geo::{Coordinate, from_e7};
use serde::Deserialize;

/// One heterogeneous entry of `timelineObjects`; only place visits are kept.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineObject {
    #[serde(default)]
    pub place_visit: Option<PlaceVisit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceVisit {
    #[serde(default)]
    pub location: Option<VisitLocation>,
    #[serde(default)]
    pub duration: Option<VisitDuration>,
    #[serde(default, rename = "centerLatE7")]
    pub center_lat_e7: Option<i64>,
    #[serde(default, rename = "centerLngE7")]
    pub center_lng_e7: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitLocation {
    #[serde(default, rename = "latitudeE7")]
    pub latitude_e7: Option<i64>,
    #[serde(default, rename = "longitudeE7")]
    pub longitude_e7: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitDuration {
    #[serde(default)]
    pub start_timestamp: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub end_timestamp: Option<DateTime<FixedOffset>>,
}

impl PlaceVisit {
    /// E7 pair of the visit: the center when present and non-zero, else the location.
    pub fn coordinate_e7(&self) -> (i64, i64) {
        match (self.center_lat_e7, self.center_lng_e7) {
            // A single zero component is a real point on the equator or prime meridian
            (Some(lat), Some(lng)) if lat != 0 || lng != 0 => (lat, lng),
            _ => {
                let location = self.location.as_ref();
                (
                    location.and_then(|l| l.latitude_e7).unwrap_or_default(),
                    location.and_then(|l| l.longitude_e7).unwrap_or_default(),
                )
            }
        }
    }

    /// The canonical record for this visit.
    pub fn to_place(&self) -> VisitedPlace {
        let (lat_e7, lng_e7) = self.coordinate_e7();
        let duration = self.duration.as_ref();

        VisitedPlace::new(
            Coordinate::new(from_e7(lat_e7), from_e7(lng_e7)),
            duration
                .and_then(|d| d.start_timestamp)
                .unwrap_or_else(unknown_instant),
            duration
                .and_then(|d| d.end_timestamp)
                .unwrap_or_else(unknown_instant),
        )
    }
}

pub(crate) fn into_places(objects: Vec<TimelineObject>) -> Vec<VisitedPlace> {
    objects
        .iter()
        .filter_map(|o| o.place_visit.as_ref())
        .map(|visit| {
            let place = visit.to_place();
            tracing::trace!(
                name = visit.location.as_ref().and_then(|l| l.name.as_deref()).unwrap_or(""),
                latitude = place.latitude(),
                longitude = place.longitude(),
                "Place visit"
            );
            place
        })
        .collect()
}
