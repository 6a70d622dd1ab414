//! Provider response shapes and their normalization into found places

pub mod geocoder;
pub mod search;
pub mod toponym;

pub use geocoder::GeocoderResponse;
pub use search::SearchResponse;
pub use toponym::{FoundPlace, ProviderResponse, ToponymKind, ToponymResolver, ToponymSource};
