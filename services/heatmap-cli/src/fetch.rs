//! One-shot dataset retrieval.
//!
//! The dataset is fetched once per run; there is no retry. A failed fetch
//! ends the run with an error instead of leaving an empty chart.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use heatmap_common::{HeatmapError, TemperatureDataset};
use reqwest::Client;
use tracing::{info, instrument};

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Url(String),
    File(PathBuf),
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetSource::Url(url) => write!(f, "{}", url),
            DatasetSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

pub struct DatasetFetcher {
    client: Client,
}

impl DatasetFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("heatmap/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Load, decode and validate the dataset.
    #[instrument(skip(self), fields(source = %source))]
    pub async fn fetch(&self, source: &DatasetSource) -> Result<TemperatureDataset> {
        let body = match source {
            DatasetSource::Url(url) => self.fetch_url(url).await?,
            DatasetSource::File(path) => tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read dataset file {}", path.display()))?,
        };

        let dataset = TemperatureDataset::from_slice(&body)?;
        dataset.validate()?;

        info!(
            records = dataset.len(),
            base_temperature = dataset.base_temperature,
            years = ?dataset.year_span(),
            "Loaded dataset"
        );

        Ok(dataset)
    }

    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>, HeatmapError> {
        let fetch_error = |message: String| HeatmapError::FetchError {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP {}", status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        info!(status = status.as_u16(), bytes = bytes.len(), "Fetched dataset");
        Ok(bytes.to_vec())
    }
}
