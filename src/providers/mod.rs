//! The external services a map session depends on.

pub mod http;
pub mod source;

pub use http::HttpProvider;
pub use source::{GeocodeQuery, MapProvider, SearchQuery};
