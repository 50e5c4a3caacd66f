use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::display::map::{DEFAULT_ATTRIBUTION, DEFAULT_TILE_URL, DEFAULT_ZOOM, FLY_DURATION};
use crate::position::{UpstreamKind, DEFAULT_SATELLITE_ID};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("poller interval must be greater than zero")]
    ZeroInterval,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub web: WebConfig,
    pub upstream: UpstreamConfig,
    pub poller: PollerConfig,
    pub map: MapConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind: String,
    pub static_dir: PathBuf,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            static_dir: PathBuf::from("src/web/static"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub kind: UpstreamKind,
    pub base_url: Option<String>,
    pub satellite_id: u32,
    #[serde(deserialize_with = "deserialize_optional_duration")]
    pub request_timeout: Option<Duration>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            kind: UpstreamKind::default(),
            base_url: None,
            satellite_id: DEFAULT_SATELLITE_ID,
            request_timeout: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    #[serde(deserialize_with = "deserialize_duration")]
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub tile_url: String,
    pub attribution: String,
    pub zoom: u8,
    #[serde(deserialize_with = "deserialize_duration")]
    pub fly_duration: Duration,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            zoom: DEFAULT_ZOOM,
            fly_duration: FLY_DURATION,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// chrono strftime pattern for the TIME field.
    pub time_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time_format: "%H:%M:%S".to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        if config.poller.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(config)
    }

    /// Loads `path` if given, otherwise falls back to the defaults.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

fn deserialize_optional_duration<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    s.map(|s| humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_str("{}").unwrap();

        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert_eq!(config.upstream.kind, UpstreamKind::WhereTheIss);
        assert_eq!(config.upstream.satellite_id, 25544);
        assert_eq!(config.upstream.request_timeout, None);
        assert_eq!(config.poller.interval, Duration::from_secs(10));
        assert_eq!(config.map.zoom, 3);
        assert_eq!(config.map.fly_duration, Duration::from_millis(1500));
        assert_eq!(config.display.time_format, "%H:%M:%S");
    }

    #[test]
    fn parses_full_document() {
        let yaml = r#"
web:
  bind: "127.0.0.1:9000"
upstream:
  kind: open_notify
  base_url: "http://localhost:1234"
  request_timeout: "5s"
poller:
  interval: "30s"
display:
  time_format: "%I:%M:%S %p"
"#;
        let config = Config::from_str(yaml).unwrap();

        assert_eq!(config.web.bind, "127.0.0.1:9000");
        assert_eq!(config.web.static_dir, PathBuf::from("src/web/static"));
        assert_eq!(config.upstream.kind, UpstreamKind::OpenNotify);
        assert_eq!(
            config.upstream.base_url.as_deref(),
            Some("http://localhost:1234")
        );
        assert_eq!(config.upstream.request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.poller.interval, Duration::from_secs(30));
        assert_eq!(config.display.time_format, "%I:%M:%S %p");
    }

    #[test]
    fn rejects_zero_interval() {
        let err = Config::from_str("poller:\n  interval: \"0s\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroInterval));
    }

    #[test]
    fn rejects_unknown_upstream_kind() {
        let err = Config::from_str("upstream:\n  kind: celestrak\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }
}
