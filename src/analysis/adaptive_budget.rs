//! Three-phase adaptive memory budget validation
//!
//! Phase A computes the cost of one sample (C_s), phase B the largest chunk the
//! budget allows (N_max) and phase C the smallest chunk the dispersion delay allows
//! (N_min). This module tabulates the three phases with the chosen scenario and
//! plots cost next to capacity vs. requirement.

use crate::common::constants::{KB_F64, THOUSAND_F64};
use crate::common::latex::{capitalize, escape_text, group_thousands, LatexTable, TableSizing};
use crate::common::plots::{
    save_png, BarSeries, GroupedBarChart, LegendPosition, PlotError, SideBySide,
};
use crate::common::ValidationRecord;
use plotters::style::RGBColor;
use std::path::{Path, PathBuf};

/// File name of the phase analysis plot
pub const PHASES_PLOT_FILE: &str = "validation_phases_analysis.png";

const PHASES_PLOT_SIZE: (u32, u32) = (2800, 1200);

const COST_COLOR: RGBColor = RGBColor(0xF1, 0x8F, 0x01);
const CAPACITY_COLOR: RGBColor = RGBColor(0x06, 0xA7, 0x7D);
const REQUIREMENT_COLOR: RGBColor = RGBColor(0xC7, 0x3E, 0x1D);

const CAPTION: &str = "Validación de las tres fases del presupuesto adaptativo de memoria. \
Fase A: costo por muestra ($C_s$). Fase B: capacidad máxima ($N_{\\max}$). \
Fase C: requerimiento mínimo físico ($N_{\\min}$). \
El escenario \"Ideal\" se activa cuando $N_{\\max} > N_{\\min}$, \
permitiendo procesar el archivo completo en un solo chunk ($N_c > N_d$).";

/// Per-record values shown in the phase analysis plot
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSeries {
    pub files: Vec<String>,
    /// Phase A cost per sample, in KB
    pub cost_kb: Vec<f64>,
    /// Phase B capacity, in thousands of samples
    pub capacity_thousands: Vec<f64>,
    /// Phase C minimum requirement, in thousands of samples
    pub requirement_thousands: Vec<f64>,
}

impl PhaseSeries {
    pub fn from_records(records: &[ValidationRecord]) -> Self {
        Self {
            files: records.iter().map(ValidationRecord::file_stem).collect(),
            cost_kb: records.iter().map(cost_per_sample_kb).collect(),
            capacity_thousands: records
                .iter()
                .map(|record| record.chunk_calculation.phase_b.max_samples as f64 / THOUSAND_F64)
                .collect(),
            requirement_thousands: records
                .iter()
                .map(|record| {
                    record.chunk_calculation.phase_c.required_min_size as f64 / THOUSAND_F64
                })
                .collect(),
        }
    }
}

/// Phase A cost per sample converted from bytes to KB
pub fn cost_per_sample_kb(record: &ValidationRecord) -> f64 {
    record.chunk_calculation.phase_a.cost_per_sample_bytes / KB_F64
}

/// Generates the adaptive budget table, one row per record in input order
pub fn generate_adaptive_budget_table(records: &[ValidationRecord]) -> String {
    LatexTable {
        caption: CAPTION.to_string(),
        label: "tab:validacion_fases_presupuesto".to_string(),
        columns: "lrrrrr".to_string(),
        sizing: TableSizing::Small,
        headers: [
            "Archivo",
            "$C_s$ (KB)",
            "$N_{\\max}$",
            "$N_{\\min}$",
            "Escenario",
            "$N_c$ final",
        ]
        .iter()
        .map(|header| header.to_string())
        .collect(),
        rows: records.iter().map(budget_row).collect(),
    }
    .render()
}

fn budget_row(record: &ValidationRecord) -> Vec<String> {
    let chunks = &record.chunk_calculation;

    vec![
        escape_text(&record.file_stem()),
        format!("{:.1}", cost_per_sample_kb(record)),
        group_thousands(chunks.phase_b.max_samples),
        group_thousands(chunks.phase_c.required_min_size),
        escape_text(&capitalize(&chunks.scenario)),
        group_thousands(chunks.final_chunk_samples),
    ]
}

/// Builds the two panels of the phase analysis figure
pub fn phase_analysis_figure(records: &[ValidationRecord]) -> SideBySide {
    let series = PhaseSeries::from_records(records);

    let cost = GroupedBarChart {
        title: "Fase A: Cálculo de Costo".to_string(),
        x_label: "Archivo".to_string(),
        y_label: "Costo (KB/muestra)".to_string(),
        categories: series.files.clone(),
        series: vec![BarSeries {
            label: "Costo por muestra (C_s)".to_string(),
            color: COST_COLOR,
            values: series.cost_kb,
        }],
        value_decimals: 1,
        hide_zero_values: false,
        legend: None,
        y_max: None,
        stats_box: Vec::new(),
    };

    let capacity = GroupedBarChart {
        title: "Fases B y C: Capacidad vs Requerimiento".to_string(),
        x_label: "Archivo".to_string(),
        y_label: "Muestras (miles)".to_string(),
        categories: series.files,
        series: vec![
            BarSeries {
                label: "Capacidad máxima (N_max)".to_string(),
                color: CAPACITY_COLOR,
                values: series.capacity_thousands,
            },
            BarSeries {
                label: "Requerimiento mínimo (N_min)".to_string(),
                color: REQUIREMENT_COLOR,
                values: series.requirement_thousands,
            },
        ],
        value_decimals: 1,
        hide_zero_values: false,
        legend: Some(LegendPosition::UpperRight),
        y_max: None,
        stats_box: Vec::new(),
    };

    SideBySide {
        left: cost,
        right: capacity,
    }
}

/// Generates the phase analysis plot
///
/// # Arguments
/// * `records` - Sorted validation records
/// * `output_dir` - Directory where the PNG file should be saved; created if missing
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the written plot
/// * `Err(PlotError)` - If plot generation failed
pub fn generate_phase_analysis_plot(
    records: &[ValidationRecord],
    output_dir: &Path,
) -> Result<PathBuf, PlotError> {
    let output_path = output_dir.join(PHASES_PLOT_FILE);
    save_png(&phase_analysis_figure(records), &output_path, PHASES_PLOT_SIZE)?;
    Ok(output_path)
}
