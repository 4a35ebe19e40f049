//! Prints the LaTeX validation tables and writes the validation plots.
//!
//! Run from the thesis directory (`Thesis-Astronomy-DeepLearning/`):
//! `cargo run --release --bin analyze-validation-results`

use argh::FromArgs;
use std::path::PathBuf;
use thesis_validation_reports::config::{ReportConfig, ReportPaths};
use thesis_validation_reports::{logging, run_validation_report, ReportError};

/// Render LaTeX tables and plots from the resource planning validation records
#[derive(FromArgs, Debug)]
struct Args {
    /// thesis directory; defaults to the current directory
    #[argh(option, short = 't')]
    thesis_dir: Option<PathBuf>,

    /// directory holding validation_component1_*.json (default: ../DRAFTS-UC/Results-polarization-finales/Validation)
    #[argh(option, short = 'r')]
    results_dir: Option<PathBuf>,

    /// directory where plots are written (default: figures/validation/Componente 1)
    #[argh(option, short = 'f')]
    figures_dir: Option<PathBuf>,

    /// print the tables only
    #[argh(switch)]
    no_plots: bool,
}

fn main() {
    logging::init();
    let args: Args = argh::from_env();

    if let Err(error) = run(args) {
        eprintln!("Error: {}", error);
        match error {
            ReportError::MissingResultsDir(_) => {
                eprintln!("Check that the validation JSON files are in that directory.")
            }
            ReportError::NoRecords { .. } => {
                eprintln!("No validation JSON files could be loaded. Check the path.")
            }
            _ => {}
        }
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), ReportError> {
    let thesis_dir = match args.thesis_dir {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(ReportError::WorkingDir)?,
    };

    let config = ReportConfig {
        paths: ReportPaths::from_thesis_dir(&thesis_dir)
            .with_results_dir(args.results_dir)
            .with_figures_dir(args.figures_dir),
        render_plots: !args.no_plots,
    };

    let stdout = std::io::stdout();
    run_validation_report(&config, &mut stdout.lock())?;
    Ok(())
}
