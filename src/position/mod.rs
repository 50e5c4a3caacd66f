mod error;
mod http;
mod provider;
#[cfg(test)]
pub mod testing;
mod types;

pub use error::PositionError;
pub use http::HttpProvider;
pub use provider::{PositionProvider, UpstreamKind, DEFAULT_SATELLITE_ID};
pub use types::Reading;
