//! Validation report driver
//!
//! Runs the whole report once: resolve paths, load, guard against missing data,
//! sort, print the three LaTeX tables and write the two plots.

use crate::analysis::{
    generate_adaptive_budget_table, generate_memory_usage_plot, generate_overlap_table,
    generate_phase_analysis_plot, generate_planning_table,
};
use crate::common::{PlotError, ValidationRecord};
use crate::config::ReportConfig;
use crate::parsing::{load_validation_records, sort_records, ParsingError};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const BANNER_WIDTH: usize = 60;

/// Errors that end a report run
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to resolve the working directory: {0}")]
    WorkingDir(std::io::Error),

    #[error("Results directory does not exist: {0}")]
    MissingResultsDir(PathBuf),

    #[error("No validation records found in {dir} ({skipped} files skipped)")]
    NoRecords { dir: PathBuf, skipped: usize },

    #[error("Parsing error: {0}")]
    Parsing(#[from] ParsingError),

    #[error("Plot generation error: {0}")]
    Plot(#[from] PlotError),

    #[error("Failed to write report output: {0}")]
    Output(#[from] std::io::Error),
}

type Result<T> = core::result::Result<T, ReportError>;

type TableRenderer = fn(&[ValidationRecord]) -> String;
type PlotRenderer = fn(&[ValidationRecord], &Path) -> core::result::Result<PathBuf, PlotError>;

/// Tables printed by the report, in order
pub const TABLES: [(&str, TableRenderer); 3] = [
    ("TABLE 1: RESOURCE PLANNING", generate_planning_table),
    ("TABLE 2: ADAPTIVE BUDGET (3 PHASES)", generate_adaptive_budget_table),
    ("TABLE 3: OVERLAP VALIDATION", generate_overlap_table),
];

/// Plots written by the report, in order
pub const PLOTS: [PlotRenderer; 2] = [generate_memory_usage_plot, generate_phase_analysis_plot];

/// What a completed run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub records_loaded: usize,
    pub files_skipped: usize,
    pub tables: usize,
    pub figures: Vec<PathBuf>,
}

/// Runs the validation report, writing console output to `out`
///
/// # Arguments
/// * `config` - Paths and options of this run
/// * `out` - Destination of the tables and progress messages (stdout in the binary)
///
/// # Returns
/// * `Ok(ReportSummary)` - If every table and plot was produced
/// * `Err(ReportError)` - If the results directory is missing, holds no readable
///   records, or a plot or console write failed
pub fn run_validation_report<W: Write>(
    config: &ReportConfig,
    out: &mut W,
) -> Result<ReportSummary> {
    let paths = &config.paths;
    writeln!(out, "Thesis directory: {}", paths.thesis_dir.display())?;
    writeln!(
        out,
        "Looking for validation records in: {}",
        paths.results_dir.display()
    )?;

    if !paths.results_dir.is_dir() {
        return Err(ReportError::MissingResultsDir(paths.results_dir.clone()));
    }

    let loaded = load_validation_records(&paths.results_dir)?;
    let files_skipped = loaded.failures.len();
    if loaded.is_empty() {
        return Err(ReportError::NoRecords {
            dir: paths.results_dir.clone(),
            skipped: files_skipped,
        });
    }

    let records = sort_records(loaded.records);
    info!(
        records = records.len(),
        skipped = files_skipped,
        "validation records loaded"
    );

    writeln!(out)?;
    write_banner(out, &format!("Found {} validation records", records.len()))?;
    if files_skipped > 0 {
        writeln!(out, "Skipped {} unreadable files", files_skipped)?;
    }
    writeln!(out)?;

    for (title, render) in TABLES {
        write_banner(out, title)?;
        writeln!(out, "{}", render(&records))?;
        writeln!(out)?;
        writeln!(out)?;
    }

    let mut figures = Vec::new();
    if config.render_plots {
        writeln!(out, "Generating plots...")?;
        for render in PLOTS {
            let path = render(&records, &paths.figures_dir)?;
            writeln!(out, "Plot saved to: {}", path.display())?;
            figures.push(path);
        }
    }

    writeln!(out)?;
    write_banner(out, "ANALYSIS COMPLETE")?;
    if config.render_plots {
        writeln!(out, "Plots saved to: {}", paths.figures_dir.display())?;
    }
    writeln!(out, "\nThe LaTeX tables are ready to copy into the document.")?;

    Ok(ReportSummary {
        records_loaded: records.len(),
        files_skipped,
        tables: TABLES.len(),
        figures,
    })
}

fn write_banner<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(out, "{}", rule)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", rule)
}
