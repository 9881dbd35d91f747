use crate::errors::FetchError;
use crate::models::InsightsPayload;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub const INSIGHTS_PATH: &str = "/api/insights";

/// Where a poller gets its insights from.
#[async_trait]
pub trait InsightSource: Send + Sync {
    async fn fetch(&self) -> Result<InsightsPayload, FetchError>;
}

pub struct HttpInsightSource {
    client: Client,
    url: String,
}

impl HttpInsightSource {
    pub fn new(url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Points at `INSIGHTS_PATH` under `base_url`.
    pub fn for_base_url(base_url: &str) -> Result<Self, FetchError> {
        Self::new(format!("{}{INSIGHTS_PATH}", base_url.trim_end_matches('/')))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl InsightSource for HttpInsightSource {
    async fn fetch(&self) -> Result<InsightsPayload, FetchError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Protocol(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_payload(&body)
    }
}

/// Decodes an insights body. Arrays and scalars are rejected even though
/// serde would map a sequence onto the struct fields.
pub fn parse_payload(body: &[u8]) -> Result<InsightsPayload, FetchError> {
    let value: Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(FetchError::Format("expected a JSON object".into()));
    }
    Ok(serde_json::from_value(value)?)
}
