//! Plotting infrastructure for the report figures
//!
//! This module provides the chart renderers used by the analysis modules,
//! built on the [`plotters`] crate. Charts are saved as PNG files with fixed
//! resolutions (1200x800 for cartesian charts, 1000x1000 for the pie chart)
//! and a white background.
//!
//! The renderers are generic over their data; the analysis modules supply
//! labels, values and colors. Histogram bucketing happens in
//! [`HistogramBins`](crate::common::buckets::HistogramBins) so bin placement
//! is testable without rasterizing anything.
//!
//! # Headless Compatibility
//! All charts use plotters' bitmap backend with its built-in font rendering,
//! so they work in headless environments (Docker/CI) without system font
//! dependencies.

use crate::common::buckets::HistogramBins;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save plot to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Pixel dimensions of the cartesian charts
const CHART_SIZE: (u32, u32) = (1200, 800);

/// Pixel dimensions of the pie chart
const PIE_SIZE: (u32, u32) = (1000, 1000);

/// A dashed vertical marker drawn over a histogram, with a legend entry
#[derive(Debug, Clone)]
pub struct ReferenceLine {
    /// Legend text, e.g. `"Mean: 10.1"`
    pub label: String,
    /// X position of the line
    pub value: f64,
    pub color: RGBColor,
}

impl ReferenceLine {
    pub fn new(label: impl Into<String>, value: f64, color: RGBColor) -> Self {
        Self {
            label: label.into(),
            value,
            color,
        }
    }
}

/// Maps a tick coordinate back to the categorical label at that index
///
/// Ticks that do not land near an integer position get an empty label, so
/// only real categories are annotated on the axis.
fn index_label(labels: &[&str], coord: f64) -> String {
    let nearest = coord.round();
    if (coord - nearest).abs() > 0.25 || nearest < 0.0 {
        return String::new();
    }
    labels
        .get(nearest as usize)
        .map(|label| (*label).to_string())
        .unwrap_or_default()
}

/// Same as [`index_label`] but with index 0 at the top of the axis
fn inverted_index_label(labels: &[&str], coord: f64) -> String {
    let nearest = coord.round();
    if (coord - nearest).abs() > 0.25 || nearest < 0.0 {
        return String::new();
    }
    let index = nearest as usize;
    if index >= labels.len() {
        return String::new();
    }
    labels[labels.len() - 1 - index].to_string()
}

/// Creates a vertical bar chart over categorical labels and saves it as PNG
///
/// # Arguments
/// * `labels` - One label per bar, drawn along the X-axis
/// * `values` - One bar height per label
/// * `title` - Chart title displayed at the top of the plot
/// * `x_label` / `y_label` - Axis descriptions
/// * `color` - Fill color of the bars
/// * `output_path` - Path where the PNG file should be saved
pub fn create_bar_chart(
    labels: &[&str],
    values: &[usize],
    title: &str,
    x_label: &str,
    y_label: &str,
    color: RGBColor,
    output_path: &Path,
) -> Result<()> {
    if labels.is_empty() || labels.len() != values.len() {
        return Err(PlotError::InvalidData(format!(
            "Bar chart needs matching non-empty labels and values, got {} labels and {} values",
            labels.len(),
            values.len()
        )));
    }

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let bar_count = labels.len();
    let y_max = values.iter().copied().max().unwrap_or(0).max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d(-0.5f64..(bar_count as f64 - 0.5), 0.0..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bar_count)
        .x_label_formatter(&|x| index_label(labels, *x))
        .x_desc(x_label)
        .y_desc(y_label)
        .label_style(("sans-serif", 25))
        .axis_desc_style(("sans-serif", 30))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(values.iter().enumerate().map(|(index, &value)| {
            Rectangle::new(
                [
                    (index as f64 - 0.35, 0.0),
                    (index as f64 + 0.35, value as f64),
                ],
                color.filled(),
            )
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

/// Creates a horizontal bar chart with the first entry drawn at the top
///
/// Callers pass entries in rank order (largest first); the renderer flips
/// the Y coordinates so rank 1 sits at the top of the figure.
///
/// # Arguments
/// * `labels` - One label per bar, drawn along the Y-axis
/// * `values` - One bar length per label
/// * `title` - Chart title displayed at the top of the plot
/// * `x_label` - X-axis description
/// * `color` - Fill color of the bars
/// * `output_path` - Path where the PNG file should be saved
pub fn create_horizontal_bar_chart(
    labels: &[&str],
    values: &[f64],
    title: &str,
    x_label: &str,
    color: RGBColor,
    output_path: &Path,
) -> Result<()> {
    if labels.is_empty() || labels.len() != values.len() {
        return Err(PlotError::InvalidData(format!(
            "Horizontal bar chart needs matching non-empty labels and values, got {} labels and {} values",
            labels.len(),
            values.len()
        )));
    }

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let bar_count = labels.len();
    let x_max = values.iter().copied().fold(0.0f64, f64::max).max(1.0) * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 36))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(280)
        .build_cartesian_2d(0.0..x_max, -0.5f64..(bar_count as f64 - 0.5))
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(bar_count)
        .y_label_formatter(&|y| inverted_index_label(labels, *y))
        .x_desc(x_label)
        .label_style(("sans-serif", 20))
        .axis_desc_style(("sans-serif", 30))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(values.iter().enumerate().map(|(index, &value)| {
            // Rank 0 maps to the highest Y coordinate, putting it on top.
            let y = (bar_count - 1 - index) as f64;
            Rectangle::new([(0.0, y - 0.35), (value, y + 0.35)], color.filled())
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

/// Creates a line chart with a filled area and point markers, one point per
/// hour bucket, and saves it as PNG
///
/// # Arguments
/// * `counts` - One value per hour, index 0 first
/// * `title` - Chart title displayed at the top of the plot
/// * `x_label` / `y_label` - Axis descriptions
/// * `color` - Line and fill color; the fill uses a 30% alpha mix
/// * `output_path` - Path where the PNG file should be saved
pub fn create_hour_area_chart(
    counts: &[usize],
    title: &str,
    x_label: &str,
    y_label: &str,
    color: RGBColor,
    output_path: &Path,
) -> Result<()> {
    if counts.is_empty() {
        return Err(PlotError::InvalidData(
            "Hourly chart needs at least one bucket".to_string(),
        ));
    }

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let points: Vec<(f64, f64)> = counts
        .iter()
        .enumerate()
        .map(|(hour, &count)| (hour as f64, count as f64))
        .collect();
    let y_max = counts.iter().copied().max().unwrap_or(0).max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d(0.0..(counts.len() as f64 - 1.0).max(1.0), 0.0..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_labels(counts.len())
        .x_label_formatter(&|x| format!("{:.0}", x.round()))
        .x_desc(x_label)
        .y_desc(y_label)
        .label_style(("sans-serif", 25))
        .axis_desc_style(("sans-serif", 30))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(AreaSeries::new(points.iter().copied(), 0.0, color.mix(0.3)))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(
            points.iter().copied(),
            color.stroke_width(2),
        ))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 4, color.filled())),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

/// Creates a pie chart and saves it as PNG
///
/// # Arguments
/// * `labels` - One label per wedge
/// * `values` - Wedge weights; shares are derived from their sum
/// * `palette` - Wedge colors, cycled when there are more wedges than colors
/// * `title` - Chart title displayed at the top of the plot
/// * `output_path` - Path where the PNG file should be saved
///
/// # Chart Properties
/// * Wedges start at the 90 degree position and carry percentage overlays
pub fn create_pie_chart(
    labels: &[&str],
    values: &[f64],
    palette: &[RGBColor],
    title: &str,
    output_path: &Path,
) -> Result<()> {
    if labels.is_empty() || labels.len() != values.len() || palette.is_empty() {
        return Err(PlotError::InvalidData(format!(
            "Pie chart needs matching non-empty labels, values and a palette, got {} labels and {} values",
            labels.len(),
            values.len()
        )));
    }
    if values.iter().any(|&value| value <= 0.0) {
        return Err(PlotError::InvalidData(
            "Pie chart weights must be positive".to_string(),
        ));
    }

    let root = BitMapBackend::new(output_path, PIE_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;
    let root = root
        .titled(title, ("sans-serif", 40))
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    let (width, height) = root.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.33;
    let colors: Vec<RGBColor> = (0..labels.len())
        .map(|index| palette[index % palette.len()])
        .collect();

    let mut pie = Pie::new(&center, &radius, values, &colors, labels);
    pie.start_angle(90.0);
    pie.label_style(("sans-serif", 24).into_font());
    pie.percentages(("sans-serif", 20).into_font().color(&BLACK));

    root.draw(&pie)
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

/// Creates a histogram with optional dashed reference lines and saves it as
/// PNG
///
/// # Arguments
/// * `values` - Raw observations; bucketed into `bin_count` equal-width bins
/// * `bin_count` - Number of bins
/// * `title` - Chart title displayed at the top of the plot
/// * `x_label` / `y_label` - Axis descriptions
/// * `color` - Bar color; drawn with a 70% alpha mix
/// * `reference_lines` - Vertical markers with legend entries (mean, median)
/// * `output_path` - Path where the PNG file should be saved
pub fn create_histogram(
    values: &[f64],
    bin_count: usize,
    title: &str,
    x_label: &str,
    y_label: &str,
    color: RGBColor,
    reference_lines: &[ReferenceLine],
    output_path: &Path,
) -> Result<()> {
    let bins = HistogramBins::build(values, bin_count).ok_or_else(|| {
        PlotError::InvalidData("Histogram needs values and a non-zero bin count".to_string())
    })?;

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let y_max = bins.counts.iter().copied().max().unwrap_or(0).max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d(bins.min..bins.range_end(), 0.0..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .label_style(("sans-serif", 25))
        .axis_desc_style(("sans-serif", 30))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(bins.counts.iter().enumerate().map(|(index, &count)| {
            Rectangle::new(
                [
                    (bins.bin_start(index), 0.0),
                    (bins.bin_start(index + 1), count as f64),
                ],
                color.mix(0.7).filled(),
            )
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    for line in reference_lines {
        let line_color = line.color;
        chart
            .draw_series(DashedLineSeries::new(
                [(line.value, 0.0), (line.value, y_max)],
                6,
                4,
                line_color.stroke_width(2),
            ))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label(line.label.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], line_color.stroke_width(2))
            });
    }

    if !reference_lines.is_empty() {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(("sans-serif", 25))
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}
