//! Geocoder responses: a `response.GeoObjectCollection.featureMember` list of GeoObjects.

use crate::core::geo::GeoCoordinate;
use crate::data::toponym::{FoundPlace, ToponymKind, ToponymSource};
use serde::{Deserialize, Serialize};

/// Root of a geocoder response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocoderResponse {
    pub response: GeocoderBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocoderBody {
    #[serde(rename = "GeoObjectCollection")]
    pub collection: GeoObjectCollection,
}

/// Members stay undecoded until read; only the first one is ever used
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GeoObjectCollection {
    #[serde(rename = "featureMember", default)]
    pub feature_member: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMember {
    #[serde(rename = "GeoObject")]
    pub geo_object: GeoObject,
}

/// A single geocoded object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeoObject {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "metaDataProperty")]
    pub meta_data: GeoObjectMetaData,
    #[serde(rename = "Point")]
    pub point: Option<GeoPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeoObjectMetaData {
    #[serde(rename = "GeocoderMetaData")]
    pub geocoder: Option<GeocoderMetaData>,
}

/// Free-text address block, shared with geo-object place search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeocoderMetaData {
    /// Precision of the object, e.g. `house`, `street`, `locality`
    pub kind: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "Address")]
    pub address: Option<AddressDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AddressDetails {
    pub formatted: Option<String>,
    pub postal_code: Option<String>,
}

/// Position as a `"lon lat"` string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub pos: String,
}

impl GeocoderMetaData {
    /// Best available one-line address
    pub fn address_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .or_else(|| self.address.as_ref().and_then(|a| a.formatted.as_deref()))
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.address.as_ref().and_then(|a| a.postal_code.as_deref())
    }
}

impl GeoObject {
    pub fn coordinate(&self) -> Option<GeoCoordinate> {
        let point = self.point.as_ref()?;
        match GeoCoordinate::from_pos(&point.pos) {
            Ok(coord) => Some(coord),
            Err(e) => {
                log::warn!("geo object {:?} has an unusable position: {}", self.name, e);
                None
            }
        }
    }

    fn display_address(&self) -> Option<String> {
        let geocoder = self.meta_data.geocoder.as_ref();
        geocoder
            .and_then(GeocoderMetaData::address_text)
            .map(str::to_string)
            .or_else(|| match (&self.description, &self.name) {
                (Some(description), Some(name)) => Some(format!("{}, {}", description, name)),
                (None, Some(name)) => Some(name.clone()),
                (Some(description), None) => Some(description.clone()),
                (None, None) => None,
            })
    }
}

impl GeocoderResponse {
    /// Decodes the first geo object
    pub fn first(&self) -> Option<GeoObject> {
        let member = self.response.collection.feature_member.first()?;
        match FeatureMember::deserialize(member) {
            Ok(member) => Some(member.geo_object),
            Err(e) => {
                log::warn!("first geocoder member is malformed: {}", e);
                None
            }
        }
    }
}

impl ToponymSource for GeocoderResponse {
    fn first_place(&self) -> Option<FoundPlace> {
        let object = self.first()?;
        let coordinate = object.coordinate()?;
        let address = object
            .display_address()
            .unwrap_or_else(|| coordinate.to_string());
        let kind = object
            .meta_data
            .geocoder
            .as_ref()
            .and_then(|g| g.kind.clone());

        Some(FoundPlace::new(coordinate, address, ToponymKind::GeoObject { kind }))
    }

    fn postal_code(&self) -> Option<String> {
        self.first()?
            .meta_data
            .geocoder
            .as_ref()?
            .postal_code()
            .map(str::to_string)
    }
}
