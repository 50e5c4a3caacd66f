mod error;
mod poller;
mod tracker;
mod types;

pub use error::TrackerError;
pub use poller::Poller;
pub use tracker::Tracker;
pub use types::Snapshot;
