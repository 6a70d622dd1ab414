//! Configuration for a map session and the providers it talks to
//!
//! Both structs deserialize from JSON with every field optional, falling back to
//! the defaults of the public static-map, search and geocoder services.

use crate::core::constants::{
    DEFAULT_CENTER, DEFAULT_IMAGE_SIZE, DEFAULT_ZOOM, MAX_IMAGE_SIZE, MAX_ZOOM, MIN_ZOOM,
};
use crate::core::geo::GeoCoordinate;
use crate::core::pixel::ImageSize;
use crate::core::viewport::Viewport;
use crate::rendering::DisplayOptions;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Endpoints and request settings for the external providers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub static_map_url: String,
    pub geocoder_url: String,
    pub search_url: String,
    pub geocoder_api_key: Option<String>,
    pub search_api_key: Option<String>,
    /// Language of search results, e.g. `ru_RU`
    pub language: String,
    /// Number of results requested from the place search
    pub search_results: u32,
    pub timeout_secs: u64,
}

impl ProviderConfig {
    pub fn yandex() -> Self {
        Self {
            static_map_url: "https://static-maps.yandex.ru/1.x/".to_string(),
            geocoder_url: "https://geocode-maps.yandex.ru/1.x/".to_string(),
            search_url: "https://search-maps.yandex.ru/v1/".to_string(),
            geocoder_api_key: None,
            search_api_key: None,
            language: "ru_RU".to_string(),
            search_results: 1,
            timeout_secs: 10,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::yandex()
    }
}

/// Everything needed to start a map session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub center: GeoCoordinate,
    pub zoom: i32,
    pub image_size: ImageSize,
    pub display: DisplayOptions,
    pub providers: ProviderConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            center: GeoCoordinate::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            zoom: DEFAULT_ZOOM,
            image_size: ImageSize::new(DEFAULT_IMAGE_SIZE.0, DEFAULT_IMAGE_SIZE.1),
            display: DisplayOptions::default(),
            providers: ProviderConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Parses a JSON configuration and validates it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.center.is_valid() {
            return Err(MapError::Config(format!(
                "initial center {} is outside the world",
                self.center
            )));
        }
        if !Viewport::is_valid_zoom(self.zoom) {
            return Err(MapError::Config(format!(
                "initial zoom {} is outside [{}, {}]",
                self.zoom, MIN_ZOOM, MAX_ZOOM
            )));
        }

        let (max_width, max_height) = MAX_IMAGE_SIZE;
        let size = self.image_size;
        if size.width == 0 || size.height == 0 || size.width > max_width || size.height > max_height
        {
            return Err(MapError::Config(format!(
                "image size {} must be between 1,1 and {},{}",
                size, max_width, max_height
            )));
        }

        if self.providers.search_results == 0 {
            return Err(MapError::Config(
                "search_results must be at least 1".to_string(),
            ));
        }
        if self.providers.timeout_secs == 0 {
            return Err(MapError::Config(
                "timeout_secs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
