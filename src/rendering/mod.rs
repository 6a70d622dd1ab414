//! Parameters of the static map image derived from session state

pub mod options;
pub mod request;

pub use options::{BaseLayer, DisplayOptions};
pub use request::RenderRequest;
