use crate::core::constants::{EDGE_MARGIN, MAX_ZOOM, MIN_ZOOM, PAN_STEP_FACTOR};
use crate::core::geo::{wrap_longitude, GeoBounds, GeoCoordinate, Span};
use crate::{MapError, Result};
use serde::Serialize;

/// Outcome of a viewport operation
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewChange {
    /// State changed, the render request has to be regenerated
    Redraw,
    /// The operation was rejected and state is identical to before
    Unchanged,
}

impl ViewChange {
    pub fn needs_redraw(self) -> bool {
        self == ViewChange::Redraw
    }
}

/// Manages the current view of the map: center, zoom and the span derived from it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Viewport {
    /// Center of the view, always border-corrected for the current span
    center: GeoCoordinate,
    /// Current zoom level, within [MIN_ZOOM, MAX_ZOOM]
    zoom: i32,
    /// Always `Span::for_zoom(zoom)`
    span: Span,
}

impl Viewport {
    /// Creates a new viewport, rejecting out-of-domain state
    pub fn new(center: GeoCoordinate, zoom: i32) -> Result<Self> {
        if !center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "center {} is outside the world",
                center
            )));
        }
        if !Self::is_valid_zoom(zoom) {
            return Err(MapError::InvalidCoordinates(format!(
                "zoom {} is outside [{}, {}]",
                zoom, MIN_ZOOM, MAX_ZOOM
            )));
        }

        let span = Span::for_zoom(zoom);
        Ok(Self {
            center: correct_borders(center, span),
            zoom,
            span,
        })
    }

    pub fn center(&self) -> GeoCoordinate {
        self.center
    }

    pub fn zoom(&self) -> i32 {
        self.zoom
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Box covered by the current view
    pub fn bounds(&self) -> GeoBounds {
        GeoBounds::around(self.center, self.span)
    }

    pub fn is_valid_zoom(zoom: i32) -> bool {
        (MIN_ZOOM..=MAX_ZOOM).contains(&zoom)
    }

    /// Sets the center of the viewport.
    ///
    /// Out-of-domain coordinates are ignored. An accepted center is shifted so the
    /// bounding box stays inside the antimeridian and the poles.
    pub fn set_center(&mut self, center: GeoCoordinate) -> ViewChange {
        if !center.is_valid() {
            log::warn!("ignoring out-of-domain center {:?}", center);
            return ViewChange::Unchanged;
        }

        self.center = correct_borders(center, self.span);
        log::debug!("center set to {} (requested {})", self.center, center);
        ViewChange::Redraw
    }

    /// Sets the zoom level; values outside [MIN_ZOOM, MAX_ZOOM] are ignored
    pub fn set_zoom(&mut self, zoom: i32) -> ViewChange {
        if !Self::is_valid_zoom(zoom) {
            log::debug!("ignoring zoom {} outside [{}, {}]", zoom, MIN_ZOOM, MAX_ZOOM);
            return ViewChange::Unchanged;
        }

        self.zoom = zoom;
        self.span = Span::for_zoom(zoom);
        self.center = correct_borders(self.center, self.span);
        log::debug!("zoom set to {} (span {})", self.zoom, self.span);
        ViewChange::Redraw
    }

    /// Zooms relative to the current level
    pub fn change_zoom(&mut self, delta: i32) -> ViewChange {
        self.set_zoom(self.zoom.saturating_add(delta))
    }

    /// Moves the center by `(dx, dy)` pan steps.
    ///
    /// Longitude wraps around the antimeridian, latitude stops at the poles. A pan
    /// that leaves the corrected center where it was is `Unchanged`.
    pub fn pan(&mut self, dx: i32, dy: i32) -> ViewChange {
        let step_lon = self.span.delta_lon * PAN_STEP_FACTOR;
        let step_lat = self.span.delta_lat * PAN_STEP_FACTOR;

        let target = GeoCoordinate::new(
            wrap_longitude(self.center.lon + f64::from(dx) * step_lon),
            (self.center.lat + f64::from(dy) * step_lat).clamp(-90.0, 90.0),
        );
        if correct_borders(target, self.span) == self.center {
            log::debug!("pan ({}, {}) is blocked at {}", dx, dy, self.center);
            return ViewChange::Unchanged;
        }
        self.set_center(target)
    }
}

/// Shifts `center` by the overflow of its bounding box past the world edges
fn correct_borders(mut center: GeoCoordinate, span: Span) -> GeoCoordinate {
    let half_lon = span.delta_lon / 2.0 + EDGE_MARGIN;
    let half_lat = span.delta_lat / 2.0 + EDGE_MARGIN;

    let west = center.lon - half_lon;
    if west < -180.0 {
        center.lon += -180.0 - west;
    }
    let east = center.lon + half_lon;
    if east > 180.0 {
        center.lon -= east - 180.0;
    }

    let south = center.lat - half_lat;
    if south < -90.0 {
        center.lat += -90.0 - south;
    }
    let north = center.lat + half_lat;
    if north > 90.0 {
        center.lat -= north - 90.0;
    }

    center
}
