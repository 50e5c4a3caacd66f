use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single snapshot of the station's position and state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reading {
    pub latitude: f64,
    pub longitude: f64,
    /// Kilometers above the ellipsoid.
    pub altitude: Option<f64>,
    /// Kilometers per hour.
    pub velocity: Option<f64>,
    /// Upstream token, e.g. `daylight` or `eclipsed`.
    pub visibility: Option<String>,
    /// Epoch seconds.
    pub timestamp: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct WhereTheIssBody {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub velocity: f64,
    pub visibility: String,
    pub timestamp: i64,
}

impl From<WhereTheIssBody> for Reading {
    fn from(body: WhereTheIssBody) -> Self {
        Reading {
            latitude: body.latitude,
            longitude: body.longitude,
            altitude: Some(body.altitude),
            velocity: Some(body.velocity),
            visibility: Some(body.visibility),
            timestamp: body.timestamp,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct OpenNotifyBody {
    #[serde(default)]
    pub message: Option<String>,
    pub timestamp: i64,
    pub iss_position: OpenNotifyPosition,
}

#[derive(Debug, Deserialize)]
pub(super) struct OpenNotifyPosition {
    pub latitude: String,
    pub longitude: String,
}
