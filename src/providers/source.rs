use crate::core::geo::{format_coordinate, GeoCoordinate};
use crate::rendering::RenderRequest;
use crate::Result;
use serde::Serialize;

/// Place search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub text: String,
    /// Result language, e.g. `ru_RU`
    pub language: String,
    pub results: u32,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, language: impl Into<String>, results: u32) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            results,
        }
    }
}

/// Geocoder request: free text for a forward lookup, `"lon,lat"` for a reverse one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeocodeQuery {
    pub geocode: String,
}

impl GeocodeQuery {
    pub fn address(text: impl Into<String>) -> Self {
        Self {
            geocode: text.into(),
        }
    }

    pub fn reverse(coord: &GeoCoordinate) -> Self {
        Self {
            geocode: format_coordinate(coord),
        }
    }
}

/// Trait representing the map image, place search and geocoder services.
///
/// Calls are blocking. Any error is treated by the session as "no result".
pub trait MapProvider {
    /// Fetch the encoded image for `request`
    fn fetch_image(&self, request: &RenderRequest) -> Result<Vec<u8>>;

    /// Run a place search and return the decoded response body
    fn search(&self, query: &SearchQuery) -> Result<serde_json::Value>;

    /// Run a geocoder lookup and return the decoded response body
    fn geocode(&self, query: &GeocodeQuery) -> Result<serde_json::Value>;
}

impl<P: MapProvider + ?Sized> MapProvider for &P {
    fn fetch_image(&self, request: &RenderRequest) -> Result<Vec<u8>> {
        (**self).fetch_image(request)
    }

    fn search(&self, query: &SearchQuery) -> Result<serde_json::Value> {
        (**self).search(query)
    }

    fn geocode(&self, query: &GeocodeQuery) -> Result<serde_json::Value> {
        (**self).geocode(query)
    }
}

impl<P: MapProvider + ?Sized> MapProvider for Box<P> {
    fn fetch_image(&self, request: &RenderRequest) -> Result<Vec<u8>> {
        (**self).fetch_image(request)
    }

    fn search(&self, query: &SearchQuery) -> Result<serde_json::Value> {
        (**self).search(query)
    }

    fn geocode(&self, query: &GeocodeQuery) -> Result<serde_json::Value> {
        (**self).geocode(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_query_uses_request_precision() {
        let query = GeocodeQuery::reverse(&GeoCoordinate::new(37.61, 55.75));
        assert_eq!(query.geocode, "37.61000000,55.75000000");
    }

    #[test]
    fn test_search_query() {
        let query = SearchQuery::new("Red Square", "en_US", 3);
        assert_eq!(query.text, "Red Square");
        assert_eq!(query.language, "en_US");
        assert_eq!(query.results, 3);
    }
}
