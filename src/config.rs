use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use crate::api::indicator::IndicatorClient;

pub const DEFAULT_COUNTRY_CODE: &str = "AF";
pub const DEFAULT_INDICATOR_KEY: &str = "AG.LND.AGRI.ZS";
pub const DEFAULT_CHART_OUTPUT: &str = "myChart.png";
pub const DEFAULT_CHART_WIDTH: u32 = 1024;
pub const DEFAULT_CHART_HEIGHT: u32 = 768;
/// Largest width or height accepted; bitmaps are allocated up front
pub const MAX_CHART_DIMENSION: u32 = 16384;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{name} must be at most {max} pixels, got {value}")]
    DimensionTooLarge { name: &'static str, value: u64, max: u32 },
}

/// Deployment settings, read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub country_code: String,
    pub indicator_key: String,
    pub chart_output: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
    /// `None` waits on the backend indefinitely
    pub http_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let number = |name: &'static str| -> Result<Option<u64>, ConfigError> {
            match var(name) {
                None => Ok(None),
                Some(value) => match u64::from_str(&value) {
                    Ok(n) if n > 0 => Ok(Some(n)),
                    _ => Err(ConfigError::InvalidNumber { name, value }),
                },
            }
        };
        let dimension = |name: &'static str, default: u32| -> Result<u32, ConfigError> {
            match number(name)? {
                None => Ok(default),
                Some(n) if n > u64::from(MAX_CHART_DIMENSION) => Err(ConfigError::DimensionTooLarge {
                    name,
                    value: n,
                    max: MAX_CHART_DIMENSION,
                }),
                Some(n) => Ok(n as u32),
            }
        };

        Ok(Self {
            api_base_url: var("INDICATOR_API_BASE_URL")
                .unwrap_or_else(|| IndicatorClient::DEFAULT_BASE_URL.to_string()),
            country_code: var("COUNTRY_CODE").unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string()),
            indicator_key: var("INDICATOR_KEY").unwrap_or_else(|| DEFAULT_INDICATOR_KEY.to_string()),
            chart_output: PathBuf::from(var("CHART_OUTPUT").unwrap_or_else(|| DEFAULT_CHART_OUTPUT.to_string())),
            chart_width: dimension("CHART_WIDTH", DEFAULT_CHART_WIDTH)?,
            chart_height: dimension("CHART_HEIGHT", DEFAULT_CHART_HEIGHT)?,
            http_timeout: number("HTTP_TIMEOUT_SECS")?.map(Duration::from_secs),
        })
    }
}
