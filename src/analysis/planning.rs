//! Resource planning validation table
//!
//! Lists, per file, the sizes the planner started from (N0, Nd, b_p), the memory it
//! was given (M_d, M_u) and the chunk size it settled on (N_c), with a mark telling
//! whether N_c is aligned to the slice length.

use crate::common::latex::{check_glyph, escape_text, group_thousands, LatexTable, TableSizing};
use crate::common::ValidationRecord;

const CAPTION: &str = "Validación del algoritmo de planificación de recursos en archivos FAST-FREX. \
Se verifica que los parámetros calculados ($N_d, b_p, M_u, N_c$) coinciden con las ecuaciones teóricas. \
La alineación ($\\checkmark$) confirma que $N_c$ es múltiplo exacto de $L_s$.";

/// Generates the resource planning table, one row per record in input order
pub fn generate_planning_table(records: &[ValidationRecord]) -> String {
    LatexTable {
        caption: CAPTION.to_string(),
        label: "tab:validacion_planificacion".to_string(),
        columns: "lrrrrrcc".to_string(),
        sizing: TableSizing::ResizeToTextWidth,
        headers: [
            "Archivo",
            "$N_0$",
            "$N_d$",
            "$b_p$ (bytes)",
            "$M_d$ (GB)",
            "$M_u$ (GB)",
            "$N_c$ final",
            "Aligned",
        ]
        .iter()
        .map(|header| header.to_string())
        .collect(),
        rows: records.iter().map(planning_row).collect(),
    }
    .render()
}

fn planning_row(record: &ValidationRecord) -> Vec<String> {
    let data = &record.data_characteristics;
    let budget = &record.memory_budget;
    let chunks = &record.chunk_calculation;

    vec![
        escape_text(&record.file_stem()),
        group_thousands(data.file_length_samples),
        group_thousands(data.decimated_samples),
        data.bytes_per_sample.to_string(),
        format!("{:.2}", budget.available_ram_gb),
        format!("{:.2}", budget.total_usable_gb),
        group_thousands(chunks.final_chunk_samples),
        check_glyph(chunks.aligned_to_slice).to_string(),
    ]
}
