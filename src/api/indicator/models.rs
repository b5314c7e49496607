use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Body of `GET /api/indicator-data/{country_code}`
///
/// `indicator_data` is `null` when the backend could not reach its own upstream,
/// so every level of the document is looked up optionally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndicatorResponse {
    #[serde(default)]
    pub indicator_data: Option<Map<String, Value>>,
}

impl IndicatorResponse {
    /// All indicators published for one country, if present
    pub fn country(&self, country_code: &str) -> Option<&Map<String, Value>> {
        self.indicator_data
            .as_ref()?
            .get(country_code)
            .and_then(Value::as_object)
    }

    /// Year -> value mapping for one indicator of one country, in the order received
    pub fn indicator(&self, country_code: &str, indicator_key: &str) -> Option<&Map<String, Value>> {
        self.country(country_code)?
            .get(indicator_key)
            .and_then(Value::as_object)
    }
}

/// Errors raised while talking to the indicator API
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The base URL or path could not be turned into a request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// Non-success HTTP status
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Body was not valid JSON or not shaped like an indicator response
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}
