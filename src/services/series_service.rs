use crate::api::indicator::IndicatorResponse;
use crate::models::{IndicatorSeries, SeriesPoint};
use crate::utils::ChartError;

/// Whether a key of the indicator mapping names a year.
///
/// Anything that reads as a finite number counts; metadata fields such as
/// `"note"` or `"unit"` do not.
pub fn is_year_key(key: &str) -> bool {
    let trimmed = key.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

/// Pull one indicator's yearly series for one country out of the response.
///
/// Years keep the order they were received in. A year published as `null`
/// (or as anything that is not a number) becomes a gap.
pub fn extract_series(
    response: &IndicatorResponse,
    country_code: &str,
    indicator_key: &str,
) -> Result<IndicatorSeries, ChartError> {
    if response.indicator_data.is_none() {
        return Err(ChartError::MissingIndicatorData);
    }

    if response.country(country_code).is_none() {
        return Err(ChartError::MissingCountry(country_code.to_string()));
    }

    let indicator = response
        .indicator(country_code, indicator_key)
        .ok_or_else(|| ChartError::MissingIndicator {
            country: country_code.to_string(),
            indicator: indicator_key.to_string(),
        })?;

    let series: IndicatorSeries = indicator
        .iter()
        .filter(|(year, _)| is_year_key(year))
        .map(|(year, value)| SeriesPoint {
            year: year.clone(),
            value: value.as_f64(),
        })
        .collect();

    if series.is_empty() {
        return Err(ChartError::EmptySeries {
            country: country_code.to_string(),
            indicator: indicator_key.to_string(),
        });
    }

    Ok(series)
}
