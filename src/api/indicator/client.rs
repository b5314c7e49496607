use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client as HttpClient, Url};
use std::time::Duration;
use super::models::{ApiError, IndicatorResponse};
use tracing::debug;

/// Anything that can produce the indicator document for a country
#[async_trait]
pub trait IndicatorSource: Send + Sync {
    async fn fetch_indicator_data(&self, country_code: &str) -> Result<IndicatorResponse, ApiError>;
}

/// Client for the backend's indicator endpoint
pub struct IndicatorClient {
    http_client: HttpClient,
    base_url: String,
}

impl IndicatorClient {
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:8000";

    /// Create a client with no request timeout
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build http client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base_url}/api/indicator-data/{country_code}` with the code as one encoded segment
    fn indicator_url(&self, country_code: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(&["api", "indicator-data", country_code]);

        Ok(url)
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }
}

#[async_trait]
impl IndicatorSource for IndicatorClient {
    /// GET /api/indicator-data/{country_code}
    ///
    /// # Returns
    /// * `Ok(IndicatorResponse)` - the parsed body, unvalidated beyond its top-level shape
    /// * `Err(ApiError)` - network failure, non-success status or unparseable body
    async fn fetch_indicator_data(&self, country_code: &str) -> Result<IndicatorResponse, ApiError> {
        let url = self.indicator_url(country_code)?;
        debug!("GET {}", url);

        let response = self.http_client
            .get(url)
            .headers(Self::create_headers())
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            debug!("Indicator API answered {}", status);
            return Err(ApiError::HttpError(status.as_u16(), body_text));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::RequestError(format!("Failed to read response body: {}", e)))?;

        serde_json::from_slice::<IndicatorResponse>(&body)
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}
