pub mod config;
pub mod constants;
pub mod geo;
pub mod pixel;
pub mod session;
pub mod viewport;
