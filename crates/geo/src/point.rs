//! Coordinate parsing for timeline exports.
//!
//! Supports:
//! - Degree-suffixed text points: `"51.6503959°, 5.0492413°"`
//! - E7 fixed-point integers: `516503959` -> `51.6503959`

use crate::{Coordinate, GeoError, Result};

/// Scale factor of the E7 integer encoding.
pub const E7_SCALE: f64 = 1e7;

/// Parses a `"lat°, lon°"` point into a coordinate.
///
/// The degree symbols are optional and surrounding whitespace is ignored.
///
/// # Errors
/// Returns [`GeoError::InvalidPoint`] when the text does not hold exactly two
/// comma-separated numbers.
///
/// # Example
/// ```
/// use office_days_geo::parse_point;
///
/// let coord = parse_point("51.6503959°, 5.0492413°").unwrap();
/// assert_eq!(coord.latitude, 51.6503959);
/// assert_eq!(coord.longitude, 5.0492413);
/// ```
pub fn parse_point(text: &str) -> Result<Coordinate> {
    let cleaned = text.replace('°', "");
    let mut parts = cleaned.split(',').map(str::trim);

    let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(GeoError::InvalidPoint(text.to_string()));
    };

    let latitude = lat
        .parse::<f64>()
        .map_err(|_| GeoError::InvalidPoint(text.to_string()))?;
    let longitude = lng
        .parse::<f64>()
        .map_err(|_| GeoError::InvalidPoint(text.to_string()))?;

    Ok(Coordinate::new(latitude, longitude))
}

/// Parses a point, falling back to `(0, 0)` when the text is malformed.
///
/// Exports occasionally contain garbage points; a single bad point must not abort
/// a whole file. The failure is logged so it does not disappear silently.
pub fn parse_point_or_origin(text: &str) -> Coordinate {
    parse_point(text).unwrap_or_else(|err| {
        tracing::warn!(point = text, error = %err, "Malformed point, using 0°, 0°");
        Coordinate::default()
    })
}

/// Converts an E7 fixed-point value to decimal degrees.
#[inline]
pub fn from_e7(value: i64) -> f64 {
    value as f64 / E7_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_degree_suffixed_point() {
        let coord = parse_point("51.6503959°, 5.0492413°").unwrap();
        assert_eq!(coord, Coordinate::new(51.6503959, 5.0492413));
    }

    #[test]
    fn test_parse_without_degree_symbols() {
        let coord = parse_point("48.1794935, 11.5858037").unwrap();
        assert_eq!(coord, Coordinate::new(48.1794935, 11.5858037));
    }

    #[test]
    fn test_parse_negative_values() {
        let coord = parse_point("-33.8688°, -151.2093°").unwrap();
        assert_eq!(coord, Coordinate::new(-33.8688, -151.2093));
    }

    #[test]
    fn test_missing_separator_is_error() {
        let err = parse_point("51.6503959° 5.0492413°").unwrap_err();
        assert!(matches!(err, GeoError::InvalidPoint(_)));
    }

    #[test]
    fn test_extra_component_is_error() {
        assert!(parse_point("1°, 2°, 3°").is_err());
    }

    #[test]
    fn test_non_numeric_is_error() {
        assert!(parse_point("north°, east°").is_err());
        assert!(parse_point("").is_err());
    }

    #[test]
    fn test_lossy_parse_falls_back_to_origin() {
        assert_eq!(parse_point_or_origin("garbage"), Coordinate::new(0.0, 0.0));
        assert_eq!(
            parse_point_or_origin("51.6503959°, 5.0492413°"),
            Coordinate::new(51.6503959, 5.0492413)
        );
    }

    #[test]
    fn test_from_e7() {
        assert_eq!(from_e7(481_794_935), 48.1794935);
        assert_eq!(from_e7(115_858_037), 11.5858037);
        assert_eq!(from_e7(-1_234_567), -0.1234567);
    }
}
