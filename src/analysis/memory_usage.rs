//! Memory budget vs. actual peak usage plot

use crate::common::plots::{save_png, BarSeries, GroupedBarChart, LegendPosition, PlotError};
use crate::common::ValidationRecord;
use plotters::style::RGBColor;
use std::path::{Path, PathBuf};

/// File name of the memory budget plot
pub const MEMORY_PLOT_FILE: &str = "validation_memory_budget.png";

const MEMORY_PLOT_SIZE: (u32, u32) = (2000, 1200);

const USABLE_COLOR: RGBColor = RGBColor(0x2E, 0x86, 0xAB);
const PEAK_COLOR: RGBColor = RGBColor(0xA2, 0x3B, 0x72);

/// Builds the memory figure: planned usable memory next to the measured peak, in GB
pub fn memory_usage_figure(records: &[ValidationRecord]) -> GroupedBarChart {
    GroupedBarChart {
        title: "Validación Cuantitativa: Presupuesto vs. Uso Real de Memoria".to_string(),
        x_label: "Archivo".to_string(),
        y_label: "Memoria (GB)".to_string(),
        categories: records.iter().map(ValidationRecord::file_stem).collect(),
        series: vec![
            BarSeries {
                label: "Memoria Utilizable (M_u)".to_string(),
                color: USABLE_COLOR,
                values: records
                    .iter()
                    .map(|record| record.memory_budget.total_usable_gb)
                    .collect(),
            },
            BarSeries {
                label: "Uso Real Pico".to_string(),
                color: PEAK_COLOR,
                values: records
                    .iter()
                    .map(|record| record.actual_processing.peak_memory_usage_gb)
                    .collect(),
            },
        ],
        value_decimals: 2,
        hide_zero_values: false,
        legend: Some(LegendPosition::UpperLeft),
        y_max: None,
        stats_box: Vec::new(),
    }
}

/// Generates the memory budget plot
///
/// # Arguments
/// * `records` - Sorted validation records
/// * `output_dir` - Directory where the PNG file should be saved; created if missing
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the written plot
/// * `Err(PlotError)` - If plot generation failed
pub fn generate_memory_usage_plot(
    records: &[ValidationRecord],
    output_dir: &Path,
) -> Result<PathBuf, PlotError> {
    let output_path = output_dir.join(MEMORY_PLOT_FILE);
    save_png(&memory_usage_figure(records), &output_path, MEMORY_PLOT_SIZE)?;
    Ok(output_path)
}
