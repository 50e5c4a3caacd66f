use thiserror::Error;

use crate::position::PositionError;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("a fetch is already in flight")]
    Busy,
    #[error("fetch failed: {0}")]
    Fetch(#[from] PositionError),
}
