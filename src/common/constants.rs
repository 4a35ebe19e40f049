//! Unit constants for report calculations
//!
//! Costs reported by the pipeline are in bytes and are shown in binary kilobytes,
//! while sample counts in plots are shown in (decimal) thousands.

/// Kibibyte as f64 (1,024.0 bytes)
pub const KB_F64: f64 = 1024.0;

/// Divisor for expressing sample counts in thousands
pub const THOUSAND_F64: f64 = 1000.0;
