//! Conversion between pixels of the rendered map image and geographic coordinates.
//!
//! The image requested from the provider covers exactly one span around the viewport
//! center, so one pixel is `span / dimension` degrees on each axis. Pixel y grows
//! downward while latitude grows upward.

use crate::core::geo::{normalize_longitude, GeoCoordinate};
use crate::core::viewport::Viewport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of the rendered map image in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Checks if a pixel position falls inside the image
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..f64::from(self.width)).contains(&x) && (0.0..f64::from(self.height)).contains(&y)
    }

    /// Pixel at the middle of the image
    pub fn center(&self) -> (f64, f64) {
        (f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.width, self.height)
    }
}

/// Maps pixels of an image of a fixed size onto the viewport it was rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelMapper {
    size: ImageSize,
}

impl PixelMapper {
    pub fn new(size: ImageSize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Geographic coordinate under pixel `(x, y)`, or `None` outside the image
    pub fn pixel_to_coordinate(&self, x: f64, y: f64, viewport: &Viewport) -> Option<GeoCoordinate> {
        pixel_to_coordinate(x, y, self.size.width, self.size.height, viewport)
    }

    /// Pixel position of a coordinate; may fall outside the image
    pub fn coordinate_to_pixel(&self, coord: &GeoCoordinate, viewport: &Viewport) -> (f64, f64) {
        let width = f64::from(self.size.width);
        let height = f64::from(self.size.height);
        let span = viewport.span();
        let center = viewport.center();
        let (cx, cy) = self.size.center();

        let d_lon = normalize_longitude(coord.lon - center.lon);
        (
            cx + d_lon * width / span.delta_lon,
            cy - (coord.lat - center.lat) * height / span.delta_lat,
        )
    }
}

/// Geographic coordinate under pixel `(x, y)` of a `width x height` image of `viewport`
pub fn pixel_to_coordinate(
    x: f64,
    y: f64,
    width: u32,
    height: u32,
    viewport: &Viewport,
) -> Option<GeoCoordinate> {
    let size = ImageSize::new(width, height);
    if !size.contains(x, y) {
        return None;
    }

    let span = viewport.span();
    let center = viewport.center();
    let (cx, cy) = size.center();

    let deg_per_px_lon = span.delta_lon / f64::from(width);
    let deg_per_px_lat = span.delta_lat / f64::from(height);

    Some(GeoCoordinate::new(
        normalize_longitude(center.lon + (x - cx) * deg_per_px_lon),
        center.lat - (y - cy) * deg_per_px_lat,
    ))
}
