//! Place search responses: a GeoJSON-like `features` collection whose properties
//! carry either organization or geo-object metadata.

use crate::core::geo::GeoCoordinate;
use crate::data::geocoder::{AddressDetails, GeocoderMetaData};
use crate::data::toponym::{FoundPlace, ToponymKind, ToponymSource};
use serde::{Deserialize, Serialize};

/// GeoJSON geometry types returned by the place search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    /// `[lon, lat]`, possibly followed by an altitude
    Point {
        coordinates: Vec<f64>,
    },
    #[serde(other)]
    Unsupported,
}

/// Search feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchFeature {
    pub geometry: Option<GeoJsonGeometry>,
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FeatureProperties {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "CompanyMetaData")]
    pub company: Option<CompanyMetaData>,
    #[serde(rename = "GeocoderMetaData")]
    pub geocoder: Option<GeocoderMetaData>,
}

/// Organization block of a business result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CompanyMetaData {
    pub name: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "Address")]
    pub address_details: Option<AddressDetails>,
}

/// Root of a place search response.
///
/// Features stay undecoded until read, so an odd record further down the list
/// cannot spoil the first one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub features: Vec<serde_json::Value>,
}

impl SearchResponse {
    /// Decodes the first feature
    pub fn first_feature(&self) -> Option<SearchFeature> {
        match SearchFeature::deserialize(self.features.first()?) {
            Ok(feature) => Some(feature),
            Err(e) => {
                log::warn!("first search feature is malformed: {}", e);
                None
            }
        }
    }
}

impl SearchFeature {
    pub fn coordinate(&self) -> Option<GeoCoordinate> {
        match &self.geometry {
            Some(GeoJsonGeometry::Point { coordinates }) => match coordinates.as_slice() {
                [lon, lat, ..] => Some(GeoCoordinate::new(*lon, *lat)),
                _ => None,
            },
            _ => None,
        }
    }

    fn fallback_address(&self) -> Option<String> {
        self.properties
            .description
            .clone()
            .or_else(|| self.properties.name.clone())
    }

    fn to_place(&self) -> Option<FoundPlace> {
        let coordinate = self.coordinate()?;
        let props = &self.properties;

        let (address, kind) = if let Some(company) = &props.company {
            let address = company
                .address
                .clone()
                .or_else(|| {
                    company
                        .address_details
                        .as_ref()
                        .and_then(|details| details.formatted.clone())
                })
                .or_else(|| self.fallback_address());
            let name = company.name.clone().or_else(|| props.name.clone());
            (address, ToponymKind::Organization { name })
        } else {
            let geocoder = props.geocoder.as_ref();
            let address = geocoder
                .and_then(GeocoderMetaData::address_text)
                .map(str::to_string)
                .or_else(|| self.fallback_address());
            let kind = geocoder.and_then(|g| g.kind.clone());
            (address, ToponymKind::GeoObject { kind })
        };

        Some(FoundPlace::new(
            coordinate,
            address.unwrap_or_else(|| coordinate.to_string()),
            kind,
        ))
    }

    fn postal_code(&self) -> Option<&str> {
        let props = &self.properties;
        props
            .company
            .as_ref()
            .and_then(|c| c.address_details.as_ref())
            .and_then(|details| details.postal_code.as_deref())
            .or_else(|| props.geocoder.as_ref().and_then(GeocoderMetaData::postal_code))
    }
}

impl ToponymSource for SearchResponse {
    fn first_place(&self) -> Option<FoundPlace> {
        self.first_feature()?.to_place()
    }

    fn postal_code(&self) -> Option<String> {
        self.first_feature()?.postal_code().map(str::to_string)
    }
}
