//! Data models for the indicator chart
//!
//! Series extracted from the API response and the display configuration
//! handed to the chart surface.

pub mod chart;
pub mod series;

// Re-export commonly used types for convenience
pub use chart::{AxisTitle, ChartConfig, ChartKind, ChartOptions, Dataset, Rgba};
pub use series::{IndicatorSeries, SeriesPoint};
