use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::display::MapFrame;
use crate::position::Reading;

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct Snapshot {
    /// `None` until the first successful fetch.
    pub reading: Option<Reading>,
    pub error: Option<String>,
    /// True while any fetch is in flight.
    pub loading: bool,
    /// Number of fetch outcomes applied so far.
    pub revision: u64,
    pub updated_at: Option<DateTime<Utc>>,
    pub map: Option<MapFrame>,
}
