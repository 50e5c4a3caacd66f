use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::error::PositionError;
use super::types::{OpenNotifyBody, Reading, WhereTheIssBody};

pub const DEFAULT_SATELLITE_ID: u32 = 25544;

/// Source of the current satellite position.
///
/// The poller and the proxy endpoint share one provider, so both always see
/// the same upstream.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    /// Fetch and decode the current reading.
    async fn current(&self) -> Result<Reading, PositionError>;

    /// Fetch the upstream body without decoding it into a [`Reading`].
    async fn raw(&self) -> Result<Value, PositionError>;
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UpstreamKind {
    #[default]
    WhereTheIss,
    OpenNotify,
}

impl UpstreamKind {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            UpstreamKind::WhereTheIss => "https://api.wheretheiss.at",
            UpstreamKind::OpenNotify => "http://api.open-notify.org",
        }
    }

    pub fn endpoint(&self, base_url: &str, satellite_id: u32) -> String {
        let base = base_url.trim_end_matches('/');
        match self {
            UpstreamKind::WhereTheIss => format!("{}/v1/satellites/{}", base, satellite_id),
            UpstreamKind::OpenNotify => format!("{}/iss-now.json", base),
        }
    }

    pub fn decode(&self, body: Value) -> Result<Reading, PositionError> {
        match self {
            UpstreamKind::WhereTheIss => {
                let body: WhereTheIssBody = serde_json::from_value(body)?;
                Ok(body.into())
            }
            UpstreamKind::OpenNotify => {
                let body: OpenNotifyBody = serde_json::from_value(body)?;
                if let Some(message) = body.message.as_deref() {
                    if message != "success" {
                        return Err(PositionError::Decode(format!(
                            "upstream message: {}",
                            message
                        )));
                    }
                }
                Ok(Reading {
                    latitude: parse_coordinate("latitude", &body.iss_position.latitude)?,
                    longitude: parse_coordinate("longitude", &body.iss_position.longitude)?,
                    altitude: None,
                    velocity: None,
                    visibility: None,
                    timestamp: body.timestamp,
                })
            }
        }
    }
}

fn parse_coordinate(field: &str, value: &str) -> Result<f64, PositionError> {
    value
        .trim()
        .parse()
        .map_err(|_| PositionError::Decode(format!("invalid {}: {:?}", field, value)))
}
