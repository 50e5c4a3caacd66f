pub mod error;
pub mod proxy;
pub mod status;
