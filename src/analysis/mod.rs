//! Domain-specific table and plot renderers
//!
//! Every renderer is independent and reads the same sorted record slice:
//! - Resource planning table
//! - Adaptive memory budget table and phase plot
//! - Dispersion overlap table
//! - Memory budget vs. peak usage plot

pub mod adaptive_budget;
pub mod memory_usage;
pub mod overlap;
pub mod planning;

// Re-export renderers for convenience
pub use adaptive_budget::{generate_adaptive_budget_table, generate_phase_analysis_plot};
pub use memory_usage::generate_memory_usage_plot;
pub use overlap::{generate_overlap_table, OverlapStatus};
pub use planning::generate_planning_table;
