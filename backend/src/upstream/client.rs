//! Access to the forecasting source.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA};
use std::time::Duration;

use super::payload::UpstreamForecast;
use crate::config::{ConfigError, UpstreamSettings};
use crate::error::{ForecastError, ForecastResult};

/// Something that can produce a raw forecast for a location.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; one instance is shared by all
/// in-flight requests.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Fetch the forecast for a location slug.
    ///
    /// One attempt only: any failure is returned immediately.
    async fn fetch(&self, location: &str) -> ForecastResult<UpstreamForecast>;
}

/// Forecasting source reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpForecastSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpForecastSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &UpstreamSettings) -> Result<Self, ConfigError> {
        Self::new(
            settings.base_url.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn forecast_url(&self, location: &str) -> String {
        format!("{}/predict/city/{}", self.base_url, location)
    }
}

#[async_trait]
impl ForecastSource for HttpForecastSource {
    async fn fetch(&self, location: &str) -> ForecastResult<UpstreamForecast> {
        let url = self.forecast_url(location);
        log::debug!("requesting forecast from {}", url);

        // Every request must observe fresh upstream state
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| ForecastError::unavailable(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForecastError::status(
                status.as_u16(),
                format!("forecast source responded with status {}", status),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ForecastError::unavailable(format!("failed to read response body: {}", e)))?;

        serde_json::from_slice(&body)
            .map_err(|e| ForecastError::malformed(format!("undecodable forecast body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_url_strips_trailing_slash() {
        let source = HttpForecastSource::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(source.base_url(), "http://localhost:8000");
        assert_eq!(
            source.forecast_url("los-angeles"),
            "http://localhost:8000/predict/city/los-angeles"
        );
    }
}
