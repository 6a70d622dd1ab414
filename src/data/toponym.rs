//! Normalization of place-search and geocoder responses into one [`FoundPlace`].

use crate::core::constants::NOT_FOUND_MARKER;
use crate::core::geo::GeoCoordinate;
use crate::data::geocoder::GeocoderResponse;
use crate::data::search::SearchResponse;
use crate::providers::{GeocodeQuery, MapProvider};
use serde::{Deserialize, Serialize};

/// Which kind of record a place was resolved from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToponymKind {
    /// A business or organization from the place search
    Organization { name: Option<String> },
    /// An address or area from a geocoder record
    GeoObject { kind: Option<String> },
}

/// Canonical, shape-independent resolved toponym
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundPlace {
    pub coordinate: GeoCoordinate,
    pub display_address: String,
    pub kind: ToponymKind,
    /// Filled in by a postal code lookup; the sentinel marks an empty lookup
    pub postal_code: Option<String>,
}

impl FoundPlace {
    pub fn new(coordinate: GeoCoordinate, display_address: String, kind: ToponymKind) -> Self {
        Self {
            coordinate,
            display_address,
            kind,
            postal_code: None,
        }
    }

    pub fn is_organization(&self) -> bool {
        matches!(self.kind, ToponymKind::Organization { .. })
    }
}

/// Capability shared by every provider response shape
pub trait ToponymSource {
    /// The first record of the response as a place, if it has usable coordinates
    fn first_place(&self) -> Option<FoundPlace>;

    /// Postal code of the first record, if the response carries one
    fn postal_code(&self) -> Option<String>;
}

/// A decoded provider response.
///
/// Variants are tried in declaration order, so a payload with a `features` list is
/// always read as a place search result before the geocoder shape is considered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProviderResponse {
    Search(SearchResponse),
    Geocoder(GeocoderResponse),
}

impl ProviderResponse {
    /// Detects the response shape; `None` for anything that matches neither
    pub fn detect(raw: &serde_json::Value) -> Option<Self> {
        match ProviderResponse::deserialize(raw) {
            Ok(response) => Some(response),
            Err(e) => {
                log::debug!("unrecognized provider response: {}", e);
                None
            }
        }
    }

    fn source(&self) -> &dyn ToponymSource {
        match self {
            ProviderResponse::Search(response) => response,
            ProviderResponse::Geocoder(response) => response,
        }
    }
}

impl ToponymSource for ProviderResponse {
    fn first_place(&self) -> Option<FoundPlace> {
        self.source().first_place()
    }

    fn postal_code(&self) -> Option<String> {
        self.source().postal_code()
    }
}

/// Turns raw provider responses into found places
#[derive(Debug, Clone, Copy, Default)]
pub struct ToponymResolver;

impl ToponymResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolves a raw response; empty, malformed and unknown shapes all mean "not found"
    pub fn resolve(&self, raw: &serde_json::Value) -> Option<FoundPlace> {
        let place = ProviderResponse::detect(raw)?.first_place()?;

        if !place.coordinate.is_valid() {
            log::warn!(
                "discarding place {:?} with out-of-domain coordinate {:?}",
                place.display_address,
                place.coordinate
            );
            return None;
        }

        log::info!("resolved {:?} at {}", place.display_address, place.coordinate);
        Some(place)
    }

    /// Postal code from a geocoder response, or the "Not found" marker
    pub fn postal_code(&self, raw: &serde_json::Value) -> String {
        ProviderResponse::detect(raw)
            .and_then(|response| response.postal_code())
            .unwrap_or_else(|| NOT_FOUND_MARKER.to_string())
    }

    /// Looks the place's address up again and stores the postal code it reports.
    ///
    /// Never fails: a transport error or a missing field leaves the marker.
    pub fn augment_postal_code<P: MapProvider + ?Sized>(&self, provider: &P, place: &mut FoundPlace) {
        let query = GeocodeQuery::address(place.display_address.clone());
        let code = match provider.geocode(&query) {
            Ok(raw) => self.postal_code(&raw),
            Err(e) => {
                log::warn!("postal code lookup for {:?} failed: {}", place.display_address, e);
                NOT_FOUND_MARKER.to_string()
            }
        };

        log::debug!("postal code of {:?}: {}", place.display_address, code);
        place.postal_code = Some(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn search_json(coordinates: [f64; 2]) -> serde_json::Value {
        json!({
            "type": "FeatureCollection",
            "properties": { "ResponseMetaData": { "SearchRequest": { "results": 1 } } },
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": coordinates },
                "properties": {
                    "name": "Cafe Pushkin",
                    "CompanyMetaData": {
                        "name": "Cafe Pushkin",
                        "address": "Moscow, Tverskoy Boulevard, 26A"
                    }
                }
            }]
        })
    }

    fn geocoder_json(pos: &str) -> serde_json::Value {
        json!({
            "response": { "GeoObjectCollection": { "featureMember": [{
                "GeoObject": {
                    "name": "Red Square",
                    "metaDataProperty": { "GeocoderMetaData": {
                        "kind": "street",
                        "text": "Russia, Moscow, Red Square",
                        "Address": { "formatted": "Russia, Moscow, Red Square", "postal_code": "109012" }
                    }},
                    "Point": { "pos": pos }
                }
            }]}}
        })
    }

    #[test]
    fn test_coordinate_order_matches_across_shapes() {
        let resolver = ToponymResolver::new();
        let from_search = resolver.resolve(&search_json([37.61, 55.75])).unwrap();
        let from_geocoder = resolver.resolve(&geocoder_json("37.61 55.75")).unwrap();

        assert_eq!(from_search.coordinate, GeoCoordinate::new(37.61, 55.75));
        assert_eq!(from_geocoder.coordinate, GeoCoordinate::new(37.61, 55.75));
    }

    #[test]
    fn test_address_extraction() {
        let resolver = ToponymResolver::new();

        let org = resolver.resolve(&search_json([37.6, 55.7])).unwrap();
        assert!(org.is_organization());
        assert_eq!(org.display_address, "Moscow, Tverskoy Boulevard, 26A");
        assert_eq!(
            org.kind,
            ToponymKind::Organization {
                name: Some("Cafe Pushkin".to_string())
            }
        );

        let geo = resolver.resolve(&geocoder_json("37.62 55.75")).unwrap();
        assert!(!geo.is_organization());
        assert_eq!(geo.display_address, "Russia, Moscow, Red Square");
        assert_eq!(geo.postal_code, None);
    }

    #[test]
    fn test_empty_results_are_not_found() {
        let resolver = ToponymResolver::new();
        assert!(resolver.resolve(&json!({ "features": [] })).is_none());
        assert!(resolver
            .resolve(&json!({ "response": { "GeoObjectCollection": { "featureMember": [] } } }))
            .is_none());
        assert!(resolver
            .resolve(&json!({ "response": { "GeoObjectCollection": {} } }))
            .is_none());
    }

    #[test]
    fn test_unknown_shapes_are_not_found() {
        let resolver = ToponymResolver::new();
        assert!(resolver.resolve(&json!(null)).is_none());
        assert!(resolver.resolve(&json!({ "error": "Forbidden" })).is_none());
        assert!(resolver.resolve(&json!({ "features": "nope" })).is_none());
        assert!(resolver.resolve(&geocoder_json("not a position")).is_none());
        assert!(resolver.resolve(&geocoder_json("200.0 10.0")).is_none());
    }

    #[test]
    fn test_first_feature_survives_odd_followers() {
        let resolver = ToponymResolver::new();

        let mut raw = search_json([37.61, 55.75]);
        raw["features"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "geometry": { "type": "Point", "coordinates": [30.3, 59.9, 0.0] } }));
        raw["features"].as_array_mut().unwrap().push(json!("garbage"));

        let place = resolver.resolve(&raw).unwrap();
        assert_eq!(place.coordinate, GeoCoordinate::new(37.61, 55.75));
        assert!(place.is_organization());
    }

    #[test]
    fn test_first_geo_object_survives_odd_followers() {
        let resolver = ToponymResolver::new();

        let mut raw = geocoder_json("37.62 55.75");
        let members = raw["response"]["GeoObjectCollection"]["featureMember"]
            .as_array_mut()
            .unwrap();
        members.push(json!({ "name": "member without a GeoObject" }));
        members.push(json!(42));

        let place = resolver.resolve(&raw).unwrap();
        assert_eq!(place.coordinate, GeoCoordinate::new(37.62, 55.75));
        assert_eq!(place.display_address, "Russia, Moscow, Red Square");
        assert_eq!(resolver.postal_code(&raw), "109012");
    }

    #[test]
    fn test_position_with_altitude_resolves() {
        let raw = json!({ "features": [{
            "geometry": { "type": "Point", "coordinates": [37.61, 55.75, 144.0] },
            "properties": { "name": "Ostankino Tower" }
        }]});

        let place = ToponymResolver::new().resolve(&raw).unwrap();
        assert_eq!(place.coordinate, GeoCoordinate::new(37.61, 55.75));
        assert_eq!(place.display_address, "Ostankino Tower");
    }

    #[test]
    fn test_malformed_first_record_is_not_found() {
        let resolver = ToponymResolver::new();
        let valid = search_json([1.0, 2.0])["features"][0].clone();
        assert!(resolver.resolve(&json!({ "features": [7, valid] })).is_none());
        assert!(resolver
            .resolve(&json!({ "response": { "GeoObjectCollection": { "featureMember": [{ "other": 1 }] } } }))
            .is_none());
    }

    #[test]
    fn test_search_shape_takes_precedence() {
        let mut raw = search_json([10.0, 20.0]);
        raw["response"] = geocoder_json("30.0 40.0")["response"].clone();

        let place = ToponymResolver::new().resolve(&raw).unwrap();
        assert_eq!(place.coordinate, GeoCoordinate::new(10.0, 20.0));
        assert!(matches!(ProviderResponse::detect(&raw), Some(ProviderResponse::Search(_))));
    }

    #[test]
    fn test_postal_code_extraction() {
        let resolver = ToponymResolver::new();
        assert_eq!(resolver.postal_code(&geocoder_json("37.62 55.75")), "109012");
        assert_eq!(resolver.postal_code(&json!({ "features": [] })), "Not found");

        let mut without_code = geocoder_json("37.62 55.75");
        without_code["response"]["GeoObjectCollection"]["featureMember"][0]["GeoObject"]
            ["metaDataProperty"]["GeocoderMetaData"]["Address"] = json!({ "formatted": "Somewhere" });
        assert_eq!(resolver.postal_code(&without_code), "Not found");
    }
}
