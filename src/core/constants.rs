//! Core constants for the viewport model and the static image provider.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Lowest zoom level the viewport accepts.
pub const MIN_ZOOM: i32 = 3;

/// Highest zoom level the viewport accepts.
pub const MAX_ZOOM: i32 = 20;

/// Zoom level a fresh session starts at.
pub const DEFAULT_ZOOM: i32 = 13;

/// Session start center as (longitude, latitude).
pub const DEFAULT_CENTER: (f64, f64) = (37.588392, 55.734036);

/// Default rendered image size in pixels (width, height).
pub const DEFAULT_IMAGE_SIZE: (u32, u32) = (450, 450);

/// Largest image the static provider renders (width, height).
pub const MAX_IMAGE_SIZE: (u32, u32) = (650, 450);

/// A unit pan step moves the center by this many spans, on both axes.
pub const PAN_STEP_FACTOR: f64 = 2.0;

/// Extra degrees kept between the bounding box and the world edges.
/// Zero keeps the box flush with the antimeridian and the poles.
pub const EDGE_MARGIN: f64 = 0.0;

/// Decimal places used when a coordinate is written into a request.
pub const COORDINATE_PRECISION: usize = 8;

/// Sentinel shown when a postal code lookup comes back empty.
pub const NOT_FOUND_MARKER: &str = "Not found";

/// Marker style appended to the `pt` parameter of a render request.
pub const MARKER_STYLE: &str = "org";

/// Text shown in place of the map when the image cannot be fetched.
pub const CONNECTION_FAILED_TEXT: &str = "Connection failed";
