//! Report generators for the FAST-FREX validation chapter.
//!
//! Two pipelines live here:
//! - [`report`]: loads `validation_component1_*.json` records, prints three LaTeX
//!   tables and renders two comparison plots.
//! - [`detections`]: renders the FRB121102 detection histogram from a fixed dataset.

pub mod analysis;
pub mod common;
pub mod config;
pub mod detections;
pub mod logging;
pub mod parsing;
pub mod report;

pub use common::ValidationRecord;
pub use parsing::{load_validation_records, sort_records, LoadReport};
pub use report::{run_validation_report, ReportError, ReportSummary};
