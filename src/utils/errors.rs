use thiserror::Error;
use crate::api::indicator::ApiError;

/// Broad category of a failed render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The fetch rejected or the body was not usable JSON
    NetworkOrParse,
    /// The response lacked the requested country, indicator or years
    MissingData,
    /// The charting backend could not draw
    Render,
}

/// Everything that can stop a chart from being drawn
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("{0}")]
    Fetch(#[from] ApiError),
    #[error("Response contains no indicator data")]
    MissingIndicatorData,
    #[error("No indicator data for country '{0}'")]
    MissingCountry(String),
    #[error("Indicator '{indicator}' not found for country '{country}'")]
    MissingIndicator { country: String, indicator: String },
    #[error("Indicator '{indicator}' for country '{country}' has no yearly values")]
    EmptySeries { country: String, indicator: String },
    #[error("Failed to render chart: {0}")]
    Render(String),
}

impl ChartError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ChartError::Fetch(_) => FailureKind::NetworkOrParse,
            ChartError::MissingIndicatorData
            | ChartError::MissingCountry(_)
            | ChartError::MissingIndicator { .. }
            | ChartError::EmptySeries { .. } => FailureKind::MissingData,
            ChartError::Render(_) => FailureKind::Render,
        }
    }
}
