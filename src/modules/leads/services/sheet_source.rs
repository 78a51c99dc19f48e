use std::time::Duration;

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use tracing::{debug, error};

use crate::config::SheetConfig;
use crate::core::{AppError, Result};

/// Supplies the raw CSV text of the lead spreadsheet
#[async_trait]
pub trait LeadSheetSource: Send + Sync {
    async fn fetch_csv(&self) -> Result<String>;
}

/// Reads the sheet's public CSV export over HTTP
pub struct HttpSheetSource {
    client: ClientWithMiddleware,
    csv_url: String,
}

impl HttpSheetSource {
    pub fn new(config: &SheetConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            csv_url: config.csv_url.clone(),
        })
    }
}

#[async_trait]
impl LeadSheetSource for HttpSheetSource {
    async fn fetch_csv(&self) -> Result<String> {
        debug!(url = %self.csv_url, "Fetching lead sheet");

        let response = self
            .client
            .get(&self.csv_url)
            .send()
            .await
            .map_err(|e| AppError::SheetSource(format!("Failed to fetch CSV: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, "Lead sheet fetch failed");
            return Err(AppError::SheetSource(format!(
                "Failed to fetch CSV: {} - {}",
                status.as_u16(),
                body
            )));
        }

        let text = response.text().await?;
        debug!(length = text.len(), "Lead sheet received");

        Ok(text)
    }
}

/// Fixed CSV text, for tests and offline runs
pub struct StaticSheetSource {
    csv: String,
}

impl StaticSheetSource {
    pub fn new(csv: impl Into<String>) -> Self {
        Self { csv: csv.into() }
    }
}

#[async_trait]
impl LeadSheetSource for StaticSheetSource {
    async fn fetch_csv(&self) -> Result<String> {
        Ok(self.csv.clone())
    }
}
