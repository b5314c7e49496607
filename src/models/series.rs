//! Indicator time-series models

/// One year of an indicator. `None` marks a year the source published without a number.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub year: String,
    pub value: Option<f64>,
}

/// Parallel year labels and values, in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSeries {
    pub years: Vec<String>,
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl FromIterator<SeriesPoint> for IndicatorSeries {
    fn from_iter<I: IntoIterator<Item = SeriesPoint>>(iter: I) -> Self {
        let (years, values) = iter.into_iter().map(|p| (p.year, p.value)).unzip();
        Self { years, values }
    }
}
