//! Chart configuration models

use plotters::style::RGBAColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
}

/// An `rgba(r, g, b, a)` colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Rgba> for RGBAColor {
    fn from(c: Rgba) -> Self {
        RGBAColor(c.r, c.g, c.b, c.a)
    }
}

/// One plotted line
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
    pub border_color: Rgba,
    pub background_color: Rgba,
    pub border_width: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Fill whatever drawing area the surface offers instead of a fixed size
    pub responsive: bool,
    pub x_title: AxisTitle,
    pub y_title: AxisTitle,
}

/// Everything a surface needs to draw the chart.
///
/// `labels` and each dataset's `data` have the same length and order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub caption: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub options: ChartOptions,
}
