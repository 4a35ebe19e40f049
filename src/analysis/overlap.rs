//! Dispersion overlap validation table
//!
//! Consecutive chunks must overlap by at least the dispersion delay of the largest
//! DM searched, otherwise bursts straddling a boundary are lost. The upstream
//! pipeline decides sufficiency; this table only reports it.

use crate::common::latex::{escape_text, group_thousands, LatexTable, TableSizing};
use crate::common::ValidationRecord;
use std::fmt;

const CAPTION: &str = "Validación del cálculo de solapamiento y retardo dispersivo. \
Se verifica que $\\Delta t_{\\max}$ es consistente con DM$_{\\max}$ en banda L (1000-1500 MHz). \
El estado \"N/A (1 chunk)\" indica que el archivo completo cupo en memoria, \
por lo que la validación de continuidad entre chunks no fue necesaria.";

/// Overlap verdict shown in the status column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapStatus {
    /// The file was processed as a single chunk, so there is no boundary to check
    SingleChunk,
    Sufficient,
    Insufficient,
}

impl OverlapStatus {
    /// Decides the status from the chunk count and the upstream sufficiency flag
    pub fn from_parts(chunk_count: usize, overlap_sufficient: bool) -> Self {
        if chunk_count == 1 {
            OverlapStatus::SingleChunk
        } else if overlap_sufficient {
            OverlapStatus::Sufficient
        } else {
            OverlapStatus::Insufficient
        }
    }

    pub fn of(record: &ValidationRecord) -> Self {
        Self::from_parts(record.chunks.len(), record.overlap_sufficient())
    }

    pub fn label(self) -> &'static str {
        match self {
            OverlapStatus::SingleChunk => "N/A (1 chunk)",
            OverlapStatus::Sufficient => "Suficiente",
            OverlapStatus::Insufficient => "Insuficiente",
        }
    }
}

impl fmt::Display for OverlapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Generates the overlap table, one row per record in input order
pub fn generate_overlap_table(records: &[ValidationRecord]) -> String {
    LatexTable {
        caption: CAPTION.to_string(),
        label: "tab:validacion_overlap".to_string(),
        columns: "lrrrr".to_string(),
        sizing: TableSizing::Small,
        headers: [
            "Archivo",
            "DM$_{\\max}$",
            "$\\Delta t_{\\max}$ (s)",
            "$O_d$ (muestras)",
            "Estado",
        ]
        .iter()
        .map(|header| header.to_string())
        .collect(),
        rows: records.iter().map(overlap_row).collect(),
    }
    .render()
}

fn overlap_row(record: &ValidationRecord) -> Vec<String> {
    vec![
        escape_text(&record.file_stem()),
        record.dm_cube.dm_max.to_string(),
        format!("{:.2}", record.dm_cube.delta_t_max_seconds),
        group_thousands(record.chunk_calculation.phase_c.overlap_decimated),
        OverlapStatus::of(record).to_string(),
    ]
}
