//! Prelude module for common mapview types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapview::prelude::*;`

pub use crate::core::{
    config::{ProviderConfig, SessionConfig},
    geo::{format_coordinate, normalize_longitude, GeoBounds, GeoCoordinate, Span},
    pixel::{ImageSize, PixelMapper},
    session::{MapImage, MapSession},
    viewport::{ViewChange, Viewport},
};

pub use crate::data::{FoundPlace, ToponymKind, ToponymResolver, ToponymSource};

pub use crate::input::{KeyCode, MapIntent};

pub use crate::providers::{GeocodeQuery, MapProvider, SearchQuery};

pub use crate::providers::HttpProvider;

pub use crate::rendering::{BaseLayer, DisplayOptions, RenderRequest};

pub use crate::{Error as MapError, Result};
