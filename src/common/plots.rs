//! Plotting infrastructure for grouped bar charts
//!
//! This module provides functionality to create grouped bar charts using the
//! [`plotters`] crate: one group per category (file), one bar per series within the
//! group, each bar annotated with its value. Figures are written as PNG through the
//! bitmap backend, or as PDF by rendering SVG in memory and converting it with
//! [`svg2pdf`].

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fs;
use std::path::Path;
use svg2pdf::usvg;
use svg2pdf::{ConversionOptions, PageOptions};
use thiserror::Error;

/// Horizontal space one group of bars occupies, in category units
const GROUP_WIDTH: f64 = 0.8;

/// Headroom above the tallest bar so value labels stay inside the chart
const Y_HEADROOM: f64 = 1.15;

/// Background of the statistics box
pub const WHEAT: RGBColor = RGBColor(245, 222, 179);

/// Errors that can occur during plot generation
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

    #[error("Failed to export PDF: {0}")]
    PdfExport(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Where the series legend is placed inside the plotting area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
}

impl From<LegendPosition> for SeriesLabelPosition {
    fn from(position: LegendPosition) -> Self {
        match position {
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
        }
    }
}

/// One bar per category, drawn in a single color
#[derive(Debug, Clone)]
pub struct BarSeries {
    pub label: String,
    pub color: RGBColor,
    /// One value per category, in category order
    pub values: Vec<f64>,
}

/// Something that can be drawn onto a drawing area of any backend
pub trait Figure {
    /// Rejects data that cannot be drawn, before any file is touched
    fn validate(&self) -> Result<()>;

    fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()>;
}

/// A grouped bar chart description
#[derive(Debug, Clone)]
pub struct GroupedBarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Group names along the X axis
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
    /// Decimals used for bar annotations and Y axis labels
    pub value_decimals: usize,
    /// Skip annotations on bars with a value of zero
    pub hide_zero_values: bool,
    pub legend: Option<LegendPosition>,
    /// Fixed upper bound of the Y axis; derived from the data when absent
    pub y_max: Option<f64>,
    /// Lines shown in a box at the upper left corner of the plotting area
    pub stats_box: Vec<String>,
}

impl GroupedBarChart {
    /// Upper bound of the Y axis
    pub fn y_upper_bound(&self) -> f64 {
        if let Some(y_max) = self.y_max {
            return y_max;
        }

        let tallest = self
            .series
            .iter()
            .flat_map(|series| series.values.iter().copied())
            .fold(0.0, f64::max);

        if tallest > 0.0 {
            tallest * Y_HEADROOM
        } else {
            1.0
        }
    }
}

impl Figure for GroupedBarChart {
    /// Checks that every series has one finite, non-negative value per category
    fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(PlotError::InvalidData(
                "Categories cannot be empty".to_string(),
            ));
        }

        if self.series.is_empty() {
            return Err(PlotError::InvalidData("Series cannot be empty".to_string()));
        }

        for series in &self.series {
            if series.values.len() != self.categories.len() {
                return Err(PlotError::InvalidData(format!(
                    "Series '{}' has {} values for {} categories",
                    series.label,
                    series.values.len(),
                    self.categories.len()
                )));
            }

            if let Some(value) = series
                .values
                .iter()
                .find(|value| !value.is_finite() || **value < 0.0)
            {
                return Err(PlotError::InvalidData(format!(
                    "Series '{}' contains invalid value {}",
                    series.label, value
                )));
            }
        }

        Ok(())
    }

    fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        self.validate()?;

        let groups = self.categories.len();
        let decimals = self.value_decimals;

        let mut chart = ChartBuilder::on(area)
            .caption(&self.title, ("sans-serif", 36))
            .margin(20)
            .x_label_area_size(70)
            .y_label_area_size(100)
            .build_cartesian_2d(-0.5..groups as f64 - 0.5, 0.0..self.y_upper_bound())
            .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

        let categories = &self.categories;
        let category_label = |x: &f64| category_at(categories, *x).unwrap_or_default();
        let value_label = |y: &f64| format_value(*y, decimals);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(groups)
            .x_label_formatter(&category_label)
            .y_label_formatter(&value_label)
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .axis_desc_style(("sans-serif", 28))
            .label_style(("sans-serif", 22))
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        let bar_width = GROUP_WIDTH / self.series.len() as f64;
        let annotation_style = TextStyle::from(("sans-serif", 20).into_font())
            .pos(Pos::new(HPos::Center, VPos::Bottom));

        for (series_index, series) in self.series.iter().enumerate() {
            let color = series.color;
            let offset = -GROUP_WIDTH / 2.0 + bar_width * series_index as f64;

            let bars = series.values.iter().enumerate().map(|(group, &value)| {
                let left = group as f64 + offset;
                Rectangle::new(
                    [(left, 0.0), (left + bar_width, value)],
                    color.mix(0.8).filled(),
                )
            });

            chart
                .draw_series(bars)
                .map_err(|e| PlotError::Drawing(e.to_string()))?
                .label(series.label.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 8), (x + 20, y + 8)], color.filled())
                });

            let annotations = series
                .values
                .iter()
                .enumerate()
                .filter(|(_, value)| !(self.hide_zero_values && **value == 0.0))
                .map(|(group, &value)| {
                    Text::new(
                        format_value(value, decimals),
                        (group as f64 + offset + bar_width / 2.0, value),
                        annotation_style.clone(),
                    )
                });

            chart
                .draw_series(annotations)
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }

        if let Some(position) = self.legend {
            chart
                .configure_series_labels()
                .position(position.into())
                .background_style(WHITE.mix(0.85))
                .border_style(BLACK)
                .label_font(("sans-serif", 22))
                .draw()
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }

        if !self.stats_box.is_empty() {
            let (plot_x, plot_y) = chart.plotting_area().get_base_pixel();
            let (area_x, area_y) = area.get_base_pixel();
            draw_stats_box(
                area,
                (plot_x - area_x + 20, plot_y - area_y + 20),
                &self.stats_box,
            )?;
        }

        Ok(())
    }
}

/// Two charts drawn next to each other, splitting the area evenly
#[derive(Debug, Clone)]
pub struct SideBySide {
    pub left: GroupedBarChart,
    pub right: GroupedBarChart,
}

impl Figure for SideBySide {
    fn validate(&self) -> Result<()> {
        self.left.validate()?;
        self.right.validate()
    }

    fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        let panels = area.split_evenly((1, 2));
        self.left.draw(&panels[0])?;
        self.right.draw(&panels[1])?;
        Ok(())
    }
}

/// Renders a figure to a PNG file, creating parent directories as needed
///
/// # Arguments
/// * `figure` - The figure to draw
/// * `output_path` - Path where the PNG file should be saved
/// * `size` - Resolution in pixels
pub fn save_png<F: Figure>(figure: &F, output_path: &Path, size: (u32, u32)) -> Result<()> {
    figure.validate()?;
    ensure_parent_dir(output_path)?;
    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    render(figure, root)
}

/// Renders a figure to a PDF file, creating parent directories as needed
///
/// The figure is drawn through the SVG backend into memory and converted, so the
/// PDF keeps text and bars as vectors.
pub fn save_pdf<F: Figure>(figure: &F, output_path: &Path, size: (u32, u32)) -> Result<()> {
    figure.validate()?;
    let pdf = svg_to_pdf(&render_svg(figure, size)?)?;
    ensure_parent_dir(output_path)?;
    fs::write(output_path, pdf)?;
    Ok(())
}

/// Renders a figure to an SVG document held in memory
pub fn render_svg<F: Figure>(figure: &F, size: (u32, u32)) -> Result<String> {
    let mut svg = String::new();
    render(figure, SVGBackend::with_string(&mut svg, size).into_drawing_area())?;
    Ok(svg)
}

/// Converts an SVG document to a single page PDF
pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| PlotError::PdfExport(e.to_string()))?;
    svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
        .map_err(|e| PlotError::PdfExport(e.to_string()))
}

fn render<DB: DrawingBackend, F: Figure>(figure: &F, root: DrawingArea<DB, Shift>) -> Result<()> {
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    figure.draw(&root)?;

    // Ensure everything is properly rendered and saved
    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

fn ensure_parent_dir(output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn draw_stats_box<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    origin: (i32, i32),
    lines: &[String],
) -> Result<()> {
    const LINE_HEIGHT: i32 = 28;
    const CHAR_WIDTH: i32 = 11;
    const PADDING: i32 = 12;

    let widest = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0) as i32;
    let (x, y) = origin;
    let corner = (
        x + widest * CHAR_WIDTH + PADDING * 2,
        y + lines.len() as i32 * LINE_HEIGHT + PADDING * 2,
    );

    area.draw(&Rectangle::new([origin, corner], WHEAT.mix(0.8).filled()))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    area.draw(&Rectangle::new([origin, corner], BLACK.stroke_width(1)))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    for (index, line) in lines.iter().enumerate() {
        area.draw(&Text::new(
            line.as_str(),
            (x + PADDING, y + PADDING + index as i32 * LINE_HEIGHT),
            ("sans-serif", 22),
        ))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    Ok(())
}

/// Maps an X axis position to the category drawn there, if it sits on a group center
fn category_at(categories: &[String], x: f64) -> Option<String> {
    let nearest = x.round();
    if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
        return None;
    }
    categories.get(nearest as usize).cloned()
}

/// Formats a bar value with a fixed number of decimals
pub fn format_value(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}
