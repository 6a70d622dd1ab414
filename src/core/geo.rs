use crate::core::constants::COORDINATE_PRECISION;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a geographical coordinate, longitude first
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lon: f64,
    pub lat: f64,
}

impl GeoCoordinate {
    /// Creates a new coordinate
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lon >= -180.0 && self.lon <= 180.0
    }

    /// Parses a geocoder position string of the form `"lon lat"`
    pub fn from_pos(pos: &str) -> Result<Self> {
        let mut parts = pos.split_whitespace();
        let (lon, lat) = match (parts.next(), parts.next(), parts.next()) {
            (Some(lon), Some(lat), None) => (lon, lat),
            _ => {
                return Err(MapError::ParseError(format!(
                    "expected \"lon lat\" position, got {:?}",
                    pos
                )))
            }
        };

        let parse = |value: &str| {
            value
                .parse::<f64>()
                .map_err(|e| MapError::ParseError(format!("bad coordinate {:?}: {}", value, e)))
        };

        Ok(Self::new(parse(lon)?, parse(lat)?))
    }
}

impl Default for GeoCoordinate {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_coordinate(self))
    }
}

/// Brings a longitude that is at most one turn off back into (-180, 180]
pub fn normalize_longitude(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else if lon <= -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

/// Reduces any longitude modulo 360 into (-180, 180]
pub fn wrap_longitude(lon: f64) -> f64 {
    let wrapped = lon.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Formats `"{lon},{lat}"` with a fixed number of decimals, as sent to providers
pub fn format_coordinate(coord: &GeoCoordinate) -> String {
    format!(
        "{:.prec$},{:.prec$}",
        coord.lon,
        coord.lat,
        prec = COORDINATE_PRECISION
    )
}

/// Angular width and height of the view in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub delta_lon: f64,
    pub delta_lat: f64,
}

impl Span {
    /// Uniform span for a zoom level: `360 / 2^z` on both axes
    pub fn for_zoom(zoom: i32) -> Self {
        let delta = 360.0 / 2_f64.powi(zoom);
        Self {
            delta_lon: delta,
            delta_lat: delta,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.prec$},{:.prec$}",
            self.delta_lon,
            self.delta_lat,
            prec = COORDINATE_PRECISION
        )
    }
}

/// Geographic box spanned by the current view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south_west: GeoCoordinate,
    pub north_east: GeoCoordinate,
}

impl GeoBounds {
    pub fn new(south_west: GeoCoordinate, north_east: GeoCoordinate) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Box of the given span centered on `center`
    pub fn around(center: GeoCoordinate, span: Span) -> Self {
        let half_lon = span.delta_lon / 2.0;
        let half_lat = span.delta_lat / 2.0;
        Self::new(
            GeoCoordinate::new(center.lon - half_lon, center.lat - half_lat),
            GeoCoordinate::new(center.lon + half_lon, center.lat + half_lat),
        )
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &GeoCoordinate) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lon >= self.south_west.lon
            && point.lon <= self.north_east.lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_longitude() {
        assert_eq!(normalize_longitude(190.0), -170.0);
        assert_eq!(normalize_longitude(-180.0), 180.0);
        assert_eq!(normalize_longitude(180.0), 180.0);
        assert_eq!(normalize_longitude(-179.5), -179.5);
        assert_eq!(normalize_longitude(37.5), 37.5);
    }

    #[test]
    fn test_normalize_longitude_idempotent() {
        for lon in [-359.0, -270.0, -180.0, -90.0, 0.0, 90.0, 180.0, 181.0, 270.0, 359.9] {
            let once = normalize_longitude(lon);
            assert_eq!(normalize_longitude(once), once, "input {}", lon);
        }
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(540.0), 180.0);
        assert_eq!(wrap_longitude(-540.0), 180.0);
        assert_eq!(wrap_longitude(725.0), 5.0);
        assert_eq!(wrap_longitude(-190.0), 170.0);
    }

    #[test]
    fn test_format_coordinate() {
        let coord = GeoCoordinate::new(37.588392, 55.734036);
        assert_eq!(format_coordinate(&coord), "37.58839200,55.73403600");
        assert_eq!(coord.to_string(), "37.58839200,55.73403600");
        assert_eq!(
            format_coordinate(&GeoCoordinate::new(-0.5, 1.0 / 3.0)),
            "-0.50000000,0.33333333"
        );
    }

    #[test]
    fn test_from_pos() {
        let coord = GeoCoordinate::from_pos("37.61 55.75").unwrap();
        assert_eq!(coord, GeoCoordinate::new(37.61, 55.75));

        assert!(GeoCoordinate::from_pos("37.61").is_err());
        assert!(GeoCoordinate::from_pos("37.61 55.75 1.0").is_err());
        assert!(GeoCoordinate::from_pos("east north").is_err());
    }

    #[test]
    fn test_span_for_zoom() {
        assert_eq!(Span::for_zoom(3).delta_lon, 45.0);
        assert_eq!(Span::for_zoom(13).delta_lat, 360.0 / 8192.0);

        for z in 3..20 {
            assert!(Span::for_zoom(z + 1).delta_lon < Span::for_zoom(z).delta_lon);
        }
    }

    #[test]
    fn test_bounds_around() {
        let bounds = GeoBounds::around(GeoCoordinate::new(10.0, 20.0), Span::for_zoom(3));
        assert_eq!(bounds.south_west, GeoCoordinate::new(-12.5, -2.5));
        assert_eq!(bounds.north_east, GeoCoordinate::new(32.5, 42.5));
        assert!(bounds.contains(&GeoCoordinate::new(0.0, 0.0)));
        assert!(!bounds.contains(&GeoCoordinate::new(40.0, 0.0)));
    }
}
