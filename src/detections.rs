//! FRB121102 detection histogram
//!
//! Compares, per observation file, the bursts already reported in the literature
//! with the candidates and new confirmations found by the DRAFTS++ pipeline. The
//! counts are fixed; this module only aggregates and presents them.

use crate::common::plots::{
    save_pdf, save_png, BarSeries, GroupedBarChart, LegendPosition, PlotError,
};
use plotters::style::RGBColor;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Base file name of the histogram outputs
pub const HISTOGRAM_FILE_STEM: &str = "frb121102_detection_histogram";

const HISTOGRAM_SIZE: (u32, u32) = (2400, 1600);

/// Observation files, in display order
pub const OBSERVATION_FILES: [&str; 6] = ["3096", "3098", "3099", "3100", "3101", "3102"];

/// Bursts confirmed by the literature
const CONFIRMED_LITERATURE: [(&str, u32); 6] = [
    ("3096", 2),
    ("3098", 3),
    ("3099", 2),
    ("3100", 9),
    ("3101", 5),
    ("3102", 3),
];

/// Candidates found by the pipeline that remain unconfirmed
const CANDIDATES_UNCONFIRMED: [(&str, u32); 6] = [
    ("3096", 3),
    ("3098", 3),
    ("3099", 3),
    ("3100", 2),
    ("3101", 2),
    ("3102", 2),
];

/// Events found by the pipeline and confirmed afterwards
const NEW_CONFIRMED: [(&str, u32); 6] = [
    ("3096", 1),
    ("3098", 0),
    ("3099", 0),
    ("3100", 0),
    ("3101", 0),
    ("3102", 1),
];

const LITERATURE_COLOR: RGBColor = RGBColor(128, 0, 128);
const CANDIDATE_COLOR: RGBColor = RGBColor(0, 255, 255);
const NEW_COLOR: RGBColor = RGBColor(0, 128, 0);

/// Detection counts of one observation file
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct FileDetections {
    #[tabled(rename = "Archivo")]
    pub file: String,
    #[tabled(rename = "Literatura")]
    pub literature: u32,
    #[tabled(rename = "Candidatos")]
    pub candidates: u32,
    #[tabled(rename = "Confirmados")]
    pub new_confirmed: u32,
    #[tabled(rename = "Total")]
    pub total: u32,
}

impl FileDetections {
    pub fn new(file: &str, literature: u32, candidates: u32, new_confirmed: u32) -> Self {
        Self {
            file: file.to_string(),
            literature,
            candidates,
            new_confirmed,
            total: literature + candidates + new_confirmed,
        }
    }
}

/// Column totals over every observation file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionTotals {
    pub literature: u32,
    pub candidates: u32,
    pub new_confirmed: u32,
}

impl DetectionTotals {
    pub fn all(&self) -> u32 {
        self.literature + self.candidates + self.new_confirmed
    }
}

/// Per-file detection counts, in [`OBSERVATION_FILES`] order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionCatalog {
    pub files: Vec<FileDetections>,
}

impl DetectionCatalog {
    /// The FRB121102 campaign
    pub fn frb121102() -> Self {
        Self::from_mappings(
            &OBSERVATION_FILES,
            &CONFIRMED_LITERATURE,
            &CANDIDATES_UNCONFIRMED,
            &NEW_CONFIRMED,
        )
    }

    /// Joins three file-to-count mappings; files missing from a mapping count zero
    pub fn from_mappings(
        files: &[&str],
        literature: &[(&str, u32)],
        candidates: &[(&str, u32)],
        new_confirmed: &[(&str, u32)],
    ) -> Self {
        let literature: BTreeMap<_, _> = literature.iter().copied().collect();
        let candidates: BTreeMap<_, _> = candidates.iter().copied().collect();
        let new_confirmed: BTreeMap<_, _> = new_confirmed.iter().copied().collect();
        let count = |map: &BTreeMap<&str, u32>, file: &str| map.get(file).copied().unwrap_or(0);

        Self {
            files: files
                .iter()
                .map(|&file| {
                    FileDetections::new(
                        file,
                        count(&literature, file),
                        count(&candidates, file),
                        count(&new_confirmed, file),
                    )
                })
                .collect(),
        }
    }

    pub fn totals(&self) -> DetectionTotals {
        self.files
            .iter()
            .fold(DetectionTotals::default(), |totals, file| DetectionTotals {
                literature: totals.literature + file.literature,
                candidates: totals.candidates + file.candidates,
                new_confirmed: totals.new_confirmed + file.new_confirmed,
            })
    }

    /// Largest single count across all files and categories
    pub fn max_count(&self) -> u32 {
        self.files
            .iter()
            .flat_map(|file| [file.literature, file.candidates, file.new_confirmed])
            .max()
            .unwrap_or(0)
    }

    /// Statistics lines shown on the chart and printed to the console
    pub fn statistics(&self) -> Vec<String> {
        let totals = self.totals();
        vec![
            format!("Total de detecciones: {}", totals.all()),
            format!("Confirmados por literatura: {}", totals.literature),
            format!("Candidatos sin confirmar: {}", totals.candidates),
            format!("Nuevos eventos confirmados: {}", totals.new_confirmed),
        ]
    }

    /// Per-file summary table with a closing TOTAL row
    pub fn summary_table(&self) -> String {
        let totals = self.totals();
        let mut rows = self.files.clone();
        rows.push(FileDetections::new(
            "TOTAL",
            totals.literature,
            totals.candidates,
            totals.new_confirmed,
        ));

        Table::new(rows).with(Style::modern()).to_string()
    }

    /// Builds the grouped bar chart: three bars per observation file
    pub fn histogram_figure(&self) -> GroupedBarChart {
        let series = |label: &str, color: RGBColor, value: fn(&FileDetections) -> u32| BarSeries {
            label: label.to_string(),
            color,
            values: self.files.iter().map(|file| value(file) as f64).collect(),
        };

        GroupedBarChart {
            title: "Detecciones de FRB121102 por Archivo de Observación: DRAFTS++ vs Literatura"
                .to_string(),
            x_label: "Archivo de Observación".to_string(),
            y_label: "Número de Detecciones".to_string(),
            categories: self.files.iter().map(|file| file.file.clone()).collect(),
            series: vec![
                series("Confirmados por literatura", LITERATURE_COLOR, |f| f.literature),
                series("Candidatos sin confirmar", CANDIDATE_COLOR, |f| f.candidates),
                series("Nuevos eventos confirmados", NEW_COLOR, |f| f.new_confirmed),
            ],
            value_decimals: 0,
            hide_zero_values: true,
            legend: Some(LegendPosition::UpperRight),
            y_max: Some(self.max_count() as f64 + 1.0),
            stats_box: self.statistics(),
        }
    }
}

/// Output paths of the histogram: the PNG raster and its PDF vector copy
pub fn histogram_paths(output_dir: &Path) -> [PathBuf; 2] {
    [
        output_dir.join(format!("{}.png", HISTOGRAM_FILE_STEM)),
        output_dir.join(format!("{}.pdf", HISTOGRAM_FILE_STEM)),
    ]
}

/// Writes the histogram as PNG and as PDF
///
/// # Arguments
/// * `catalog` - Detection counts to plot
/// * `output_dir` - Directory where both files should be saved; created if missing
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` - Paths of the PNG and PDF files
/// * `Err(PlotError)` - If plot generation failed
pub fn generate_detection_histogram(
    catalog: &DetectionCatalog,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, PlotError> {
    let figure = catalog.histogram_figure();
    let [png_path, pdf_path] = histogram_paths(output_dir);

    save_png(&figure, &png_path, HISTOGRAM_SIZE)?;
    save_pdf(&figure, &pdf_path, HISTOGRAM_SIZE)?;

    Ok(vec![png_path, pdf_path])
}
