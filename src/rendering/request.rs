use crate::core::constants::MARKER_STYLE;
use crate::core::geo::{format_coordinate, GeoBounds, GeoCoordinate, Span};
use crate::core::pixel::ImageSize;
use crate::core::viewport::Viewport;
use crate::rendering::options::DisplayOptions;
use serde::Serialize;

/// Full parameter set for one static map image.
///
/// Always built from scratch out of the current state, never patched, so no field
/// can outlive the state it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderRequest {
    pub center: GeoCoordinate,
    pub zoom: i32,
    /// Extent of the image in degrees
    pub span: Span,
    /// Provider layer list, see [`DisplayOptions::layer_param`]
    pub layers: String,
    pub size: ImageSize,
    /// Point marked on the image, if a place is found
    pub marker: Option<GeoCoordinate>,
}

impl RenderRequest {
    pub fn new(
        viewport: &Viewport,
        options: &DisplayOptions,
        size: ImageSize,
        marker: Option<GeoCoordinate>,
    ) -> Self {
        Self {
            center: viewport.center(),
            zoom: viewport.zoom(),
            span: viewport.span(),
            layers: options.layer_param(),
            size,
            marker,
        }
    }

    pub fn bounds(&self) -> GeoBounds {
        GeoBounds::around(self.center, self.span)
    }

    /// Query parameters for the static image provider
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("ll", format_coordinate(&self.center)),
            ("spn", self.span.to_string()),
            ("l", self.layers.clone()),
            ("size", self.size.to_string()),
        ];
        if let Some(marker) = &self.marker {
            params.push(("pt", format!("{},{}", format_coordinate(marker), MARKER_STYLE)));
        }
        params
    }
}
