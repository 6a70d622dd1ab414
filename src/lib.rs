//! # mapview
//!
//! Viewport and geocoding-result reconciliation for a static-image map viewer.
//!
//! The crate keeps the authoritative "where the map is looking" state, turns pan,
//! zoom and click gestures into new geographic state, and normalizes place-search
//! and geocoder responses into one [`FoundPlace`]. Rendering, widgets and the HTTP
//! transport stay outside; the transport is reached through [`MapProvider`].

pub mod core;
pub mod data;
pub mod input;
pub mod prelude;
pub mod providers;
pub mod rendering;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{ProviderConfig, SessionConfig},
    geo::{format_coordinate, normalize_longitude, GeoBounds, GeoCoordinate, Span},
    pixel::{pixel_to_coordinate, ImageSize, PixelMapper},
    session::{MapImage, MapSession},
    viewport::{ViewChange, Viewport},
};

pub use crate::data::{FoundPlace, ProviderResponse, ToponymKind, ToponymResolver};

pub use crate::input::{KeyCode, MapIntent};

pub use crate::providers::{GeocodeQuery, MapProvider, SearchQuery};

pub use crate::providers::HttpProvider;

pub use crate::rendering::{BaseLayer, DisplayOptions, RenderRequest};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;
