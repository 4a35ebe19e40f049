//! Input and output locations for the validation report
//!
//! The report is meant to be run from the thesis directory
//! (`Thesis-Astronomy-DeepLearning/`). Its sibling `DRAFTS-UC/` holds the pipeline
//! results, and figures are written inside the thesis tree.

use std::path::{Path, PathBuf};

/// Directory of the pipeline checkout, relative to the thesis parent directory
pub const DRAFTS_DIR: &str = "DRAFTS-UC";

/// Results directory, relative to [`DRAFTS_DIR`]
pub const RESULTS_SUBDIR: [&str; 2] = ["Results-polarization-finales", "Validation"];

/// Figures directory, relative to the thesis directory
pub const FIGURES_SUBDIR: [&str; 3] = ["figures", "validation", "Componente 1"];

/// Resolved paths of one report run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub thesis_dir: PathBuf,
    /// Where the `validation_component1_*.json` files are read from
    pub results_dir: PathBuf,
    /// Where the plots are written
    pub figures_dir: PathBuf,
}

impl ReportPaths {
    /// Applies the directory convention to a thesis directory
    pub fn from_thesis_dir(thesis_dir: &Path) -> Self {
        let drafts_dir = match thesis_dir.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(DRAFTS_DIR),
            _ => thesis_dir.join("..").join(DRAFTS_DIR),
        };

        Self {
            thesis_dir: thesis_dir.to_path_buf(),
            results_dir: RESULTS_SUBDIR.iter().fold(drafts_dir, |dir, part| dir.join(part)),
            figures_dir: FIGURES_SUBDIR
                .iter()
                .fold(thesis_dir.to_path_buf(), |dir, part| dir.join(part)),
        }
    }

    /// Replaces the conventional results directory
    pub fn with_results_dir(mut self, results_dir: Option<PathBuf>) -> Self {
        if let Some(results_dir) = results_dir {
            self.results_dir = results_dir;
        }
        self
    }

    /// Replaces the conventional figures directory
    pub fn with_figures_dir(mut self, figures_dir: Option<PathBuf>) -> Self {
        if let Some(figures_dir) = figures_dir {
            self.figures_dir = figures_dir;
        }
        self
    }
}

/// Options for one run of the validation report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub paths: ReportPaths,
    /// Write the two plots after the tables
    pub render_plots: bool,
}
