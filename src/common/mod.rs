//! Common infrastructure modules shared across the reports
//!
//! This module provides reusable infrastructure for:
//! - Data structures for validation records
//! - LaTeX table scaffolding and number formatting
//! - Plotting grouped bar charts
//! - Unit conversion constants

pub mod constants;
pub mod data_structures;
pub mod latex;
pub mod plots;

// Re-export commonly used items
pub use data_structures::ValidationRecord;
pub use plots::PlotError;
