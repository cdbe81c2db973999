use crate::config::toml_config::HttpConfig;
use crate::domain::ports::PageFetcher;
use crate::utils::error::{AttendanceError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Fetches pages over HTTP with a single attempt per request.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        tracing::debug!("Making HTTP request to: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("HTTP response status: {}", status);
        if !status.is_success() {
            return Err(AttendanceError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
