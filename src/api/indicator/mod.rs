pub mod client;
pub mod models;

pub use client::{IndicatorClient, IndicatorSource};
pub use models::{ApiError, IndicatorResponse};
