//! Schema detection and normalization of location-history exports.
//!
//! Google has shipped several incompatible layouts over the years. Decoding happens
//! in two steps:
//!
//! 1. The top-level object is read into [`RawDocument`], which keeps the payload of
//!    every known schema key as unparsed JSON.
//! 2. [`SchemaKind::DETECTION_ORDER`] is walked and the first kind whose key is
//!    present and not `null` is decoded into a [`TimelineDocument`]. No other kind is
//!    attempted, so residual legacy keys in newer exports are never mistaken for the
//!    primary data.
//!
//! Supporting another layout means adding a [`SchemaKind`], its key, and a
//! [`TimelineDocument`] variant.

pub mod legacy;
pub mod semantic;

use crate::error::Result;
use crate::record::VisitedPlace;
use serde::de::{Deserialize, DeserializeOwned, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde_json::value::RawValue;
use std::fmt;
use std::io::Read;

pub use legacy::{PlaceVisit, TimelineObject};
pub use semantic::{PathPoint, SemanticSegment};

/// The export layouts this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// On-device export with `semanticSegments` (newest)
    SemanticSegments,
    /// Takeout export with `timelineObjects`
    TimelineObjects,
}

impl SchemaKind {
    /// Newest first; the first present key wins.
    pub const DETECTION_ORDER: [SchemaKind; 2] = [SchemaKind::SemanticSegments, SchemaKind::TimelineObjects];

    /// Top-level JSON key that identifies this layout.
    pub fn key(self) -> &'static str {
        match self {
            SchemaKind::SemanticSegments => "semanticSegments",
            SchemaKind::TimelineObjects => "timelineObjects",
        }
    }

    fn decode(self, raw: &RawValue) -> Result<TimelineDocument> {
        let document = match self {
            SchemaKind::SemanticSegments => TimelineDocument::SemanticSegments(decode_entries(raw)?),
            SchemaKind::TimelineObjects => TimelineDocument::TimelineObjects(decode_entries(raw)?),
        };
        Ok(document)
    }
}

/// Decodes a payload array, dropping `null` entries instead of failing the file.
fn decode_entries<T: DeserializeOwned>(raw: &RawValue) -> Result<Vec<T>> {
    let entries: Vec<Option<T>> = serde_json::from_str(raw.get())?;
    Ok(entries.into_iter().flatten().collect())
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Top level of an export with each known payload left undecoded.
///
/// Only a JSON object is accepted. `null` payloads deserialize to `None`, the same as
/// a missing key, and unknown keys are skipped without being buffered.
#[derive(Debug, Default)]
pub struct RawDocument {
    semantic_segments: Option<Box<RawValue>>,
    timeline_objects: Option<Box<RawValue>>,
}

impl RawDocument {
    fn payload(&self, kind: SchemaKind) -> Option<&RawValue> {
        match kind {
            SchemaKind::SemanticSegments => self.semantic_segments.as_deref(),
            SchemaKind::TimelineObjects => self.timeline_objects.as_deref(),
        }
    }

    fn slot(&mut self, key: &str) -> Option<&mut Option<Box<RawValue>>> {
        let kind = SchemaKind::DETECTION_ORDER.into_iter().find(|kind| kind.key() == key)?;
        Some(match kind {
            SchemaKind::SemanticSegments => &mut self.semantic_segments,
            SchemaKind::TimelineObjects => &mut self.timeline_objects,
        })
    }

    /// The first layout in detection order whose key is present.
    pub fn detect(&self) -> Option<SchemaKind> {
        SchemaKind::DETECTION_ORDER
            .into_iter()
            .find(|kind| self.payload(*kind).is_some())
    }
}

impl<'de> Deserialize<'de> for RawDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = RawDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a location history object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<RawDocument, A::Error> {
                let mut document = RawDocument::default();
                while let Some(key) = map.next_key::<String>()? {
                    match document.slot(&key) {
                        Some(slot) => *slot = map.next_value()?,
                        None => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(document)
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}

/// A decoded export in one of the supported layouts.
#[derive(Debug, Clone)]
pub enum TimelineDocument {
    SemanticSegments(Vec<SemanticSegment>),
    TimelineObjects(Vec<TimelineObject>),
}

impl TimelineDocument {
    /// Decodes an export from a reader.
    ///
    /// # Errors
    /// [`TimelineError::Io`](crate::TimelineError::Io) when reading fails and
    /// [`TimelineError::Decode`](crate::TimelineError::Decode) when the JSON is
    /// malformed or a payload does not match its layout.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: RawDocument = serde_json::from_reader(reader)?;
        Self::from_raw(&raw)
    }

    /// Decodes an export held in memory.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawDocument = serde_json::from_str(json)?;
        Self::from_raw(&raw)
    }

    /// Decodes the payload of the first detected layout.
    ///
    /// A document without any known key is treated as an empty legacy export.
    pub fn from_raw(raw: &RawDocument) -> Result<Self> {
        for kind in SchemaKind::DETECTION_ORDER {
            if let Some(payload) = raw.payload(kind) {
                tracing::trace!(schema = %kind, "Detected export schema");
                return kind.decode(payload);
            }
        }

        tracing::debug!("No known timeline key found, treating document as empty");
        Ok(TimelineDocument::TimelineObjects(Vec::new()))
    }

    /// Which layout this document was decoded from.
    pub fn kind(&self) -> SchemaKind {
        match self {
            TimelineDocument::SemanticSegments(_) => SchemaKind::SemanticSegments,
            TimelineDocument::TimelineObjects(_) => SchemaKind::TimelineObjects,
        }
    }

    /// Flattens the document into canonical records, in source order.
    pub fn into_places(self) -> Vec<VisitedPlace> {
        match self {
            TimelineDocument::SemanticSegments(segments) => semantic::into_places(segments),
            TimelineDocument::TimelineObjects(objects) => legacy::into_places(objects),
        }
    }
}

/// Reads an export and returns its records in source order.
pub fn normalize_reader<R: Read>(reader: R) -> Result<Vec<VisitedPlace>> {
    Ok(TimelineDocument::from_reader(reader)?.into_places())
}

/// Parses an in-memory export and returns its records in source order.
pub fn normalize_str(json: &str) -> Result<Vec<VisitedPlace>> {
    Ok(TimelineDocument::from_json_str(json)?.into_places())
}
