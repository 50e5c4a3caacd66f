use async_trait::async_trait;
use serde_json::Value;

use super::error::PositionError;
use super::provider::{PositionProvider, UpstreamKind};
use super::types::Reading;
use crate::web::config::UpstreamConfig;

pub struct HttpProvider {
    client: reqwest::Client,
    kind: UpstreamKind,
    url: String,
}

impl HttpProvider {
    pub fn new(config: &UpstreamConfig) -> Result<Self, PositionError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let base_url = config
            .base_url
            .as_deref()
            .unwrap_or_else(|| config.kind.default_base_url());
        let url = config.kind.endpoint(base_url, config.satellite_id);

        log::info!("Using {} upstream at {}", config.kind, url);

        Ok(Self {
            client,
            kind: config.kind,
            url,
        })
    }
}

#[async_trait]
impl PositionProvider for HttpProvider {
    async fn current(&self) -> Result<Reading, PositionError> {
        let body = self.raw().await?;
        self.kind.decode(body)
    }

    async fn raw(&self) -> Result<Value, PositionError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PositionError::Status(status.as_u16()));
        }

        Ok(response.json::<Value>().await?)
    }
}
