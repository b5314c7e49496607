use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;
use crate::models::{AxisTitle, ChartConfig, ChartKind, ChartOptions, Dataset, IndicatorSeries, Rgba};
use crate::utils::ChartError;

pub const DATASET_LABEL: &str = "Indicator Data";
pub const BORDER_COLOR: Rgba = Rgba::new(75, 192, 192, 1.0);
pub const BACKGROUND_COLOR: Rgba = Rgba::new(75, 192, 192, 0.2);
pub const BORDER_WIDTH: u32 = 1;

/// Canvas size used when the chart is not responsive
const FIXED_CANVAS: (u32, u32) = (300, 150);
/// Most year labels drawn on the x axis before they start to overlap
const MAX_X_LABELS: usize = 20;

/// Build the static line-chart configuration for one series
pub fn build_chart_config(series: &IndicatorSeries, country_code: &str, indicator_key: &str) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Line,
        caption: format!("{} ({})", indicator_key, country_code),
        labels: series.years.clone(),
        datasets: vec![Dataset {
            label: DATASET_LABEL.to_string(),
            data: series.values.clone(),
            border_color: BORDER_COLOR,
            background_color: BACKGROUND_COLOR,
            border_width: BORDER_WIDTH,
        }],
        options: ChartOptions {
            responsive: true,
            x_title: AxisTitle { display: true, text: "Year".to_string() },
            y_title: AxisTitle { display: true, text: "Value".to_string() },
        },
    }
}

/// Something a chart can be drawn into
pub trait ChartSurface {
    fn draw(&mut self, config: &ChartConfig) -> Result<(), ChartError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// `.svg` files get vector output, everything else a bitmap
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => OutputFormat::Svg,
            _ => OutputFormat::Png,
        }
    }
}

/// Draws charts into an image file with plotters
#[derive(Debug, Clone)]
pub struct PlottersSurface {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl PlottersSurface {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> OutputFormat {
        OutputFormat::from_path(&self.path)
    }
}

impl ChartSurface for PlottersSurface {
    fn draw(&mut self, config: &ChartConfig) -> Result<(), ChartError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| ChartError::Render(format!("Failed to create {}: {}", parent.display(), e)))?;
        }

        debug!("Drawing {:?} chart into {}", self.format(), self.path.display());
        let size = (self.width, self.height);
        let format = self.format();
        write_staged(&self.path, |staged| match format {
            OutputFormat::Svg => draw_line_chart(SVGBackend::new(staged, size).into_drawing_area(), config),
            OutputFormat::Png => draw_line_chart(BitMapBackend::new(staged, size).into_drawing_area(), config),
        })
    }
}

/// Sibling of `path` the chart is drawn into first. Keeps the extension,
/// which the bitmap encoder picks the image format from.
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".partial-{}", name))
}

/// Run `draw` against a staging file and move it over `path` only if it succeeded.
///
/// A failed draw leaves `path` as it was; backends that flush on drop may
/// still have written the staging file, so it is removed.
fn write_staged<F>(path: &Path, draw: F) -> Result<(), ChartError>
where
    F: FnOnce(&Path) -> Result<(), ChartError>,
{
    let staged = staging_path(path);

    if let Err(e) = draw(&staged) {
        let _ = std::fs::remove_file(&staged);
        return Err(e);
    }

    std::fs::rename(&staged, path).map_err(|e| {
        let _ = std::fs::remove_file(&staged);
        ChartError::Render(format!("Failed to write {}: {}", path.display(), e))
    })
}

/// Split a dataset into runs of consecutive present values, indexed by label position
pub fn line_segments(data: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for (i, value) in data.iter().enumerate() {
        match value {
            Some(y) => current.push((i as f64, *y)),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Y range covering every dataset with 10% padding on both ends
pub fn value_range(datasets: &[Dataset]) -> (f64, f64) {
    let (min, max) = datasets
        .iter()
        .flat_map(|d| d.data.iter().flatten())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    let range = max - min;
    let padding = if range > 0.0 { range * 0.1 } else { max.abs().max(1.0) * 0.1 };
    (min - padding, max + padding)
}

/// Year label for an x coordinate; empty between categories
fn label_at(labels: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

fn draw_line_chart<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    config: &ChartConfig,
) -> Result<(), ChartError> {
    root.fill(&WHITE)
        .map_err(|e| ChartError::Render(format!("Failed to fill canvas: {}", e)))?;

    let area = if config.options.responsive {
        root
    } else {
        root.shrink((0, 0), FIXED_CANVAS)
    };

    let labels = &config.labels;
    let x_range = -0.5..(labels.len().max(1) as f64 - 0.5);
    let (y_min, y_max) = value_range(&config.datasets);

    let mut chart = ChartBuilder::on(&area)
        .caption(&config.caption, ("sans-serif", 32.0).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_min..y_max)
        .map_err(|e| ChartError::Render(format!("Failed to build chart: {}", e)))?;

    let year_label = |x: &f64| label_at(labels, *x);
    let mut mesh = chart.configure_mesh();
    mesh.x_labels(labels.len().clamp(1, MAX_X_LABELS))
        .x_label_formatter(&year_label)
        .disable_x_mesh();
    if config.options.x_title.display {
        mesh.x_desc(config.options.x_title.text.as_str());
    }
    if config.options.y_title.display {
        mesh.y_desc(config.options.y_title.text.as_str());
    }
    mesh.draw()
        .map_err(|e| ChartError::Render(format!("Failed to draw mesh: {}", e)))?;

    for dataset in &config.datasets {
        let border: RGBAColor = dataset.border_color.into();
        let background: RGBAColor = dataset.background_color.into();
        let line_style = ShapeStyle {
            color: border,
            filled: false,
            stroke_width: dataset.border_width,
        };

        for segment in line_segments(&dataset.data) {
            chart
                .draw_series(LineSeries::new(segment, line_style))
                .map_err(|e| ChartError::Render(format!("Failed to draw line: {}", e)))?;
        }

        let points: Vec<(f64, f64)> = line_segments(&dataset.data).into_iter().flatten().collect();
        chart
            .draw_series(points.iter().map(|&p| Circle::new(p, 3, background.filled())))
            .map_err(|e| ChartError::Render(format!("Failed to draw point: {}", e)))?;
        chart
            .draw_series(points.iter().map(|&p| Circle::new(p, 3, line_style)))
            .map_err(|e| ChartError::Render(format!("Failed to draw point: {}", e)))?
            .label(dataset.label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 30, y + 5)], background.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperMiddle)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| ChartError::Render(format!("Failed to draw legend: {}", e)))?;

    area.present()
        .map_err(|e| ChartError::Render(format!("Failed to render chart: {}", e)))?;

    Ok(())
}
