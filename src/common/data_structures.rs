use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::path::Path;

/// Size properties of the observation file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataCharacteristics {
    /// Raw file length in samples (N0)
    pub file_length_samples: u64,
    /// Sample count after downsampling (Nd)
    pub decimated_samples: u64,
    /// Bytes per decimated sample (b_p)
    pub bytes_per_sample: u64,
}

/// Memory available to the pipeline when the file was planned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryBudget {
    /// RAM available on the host (M_d)
    pub available_ram_gb: f64,
    /// Portion of the available RAM the planner may use (M_u)
    pub total_usable_gb: f64,
}

/// Phase A of the adaptive budget: per-sample cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseA {
    pub cost_per_sample_bytes: f64,
}

/// Phase B of the adaptive budget: capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseB {
    pub max_samples: u64,
}

/// Phase C of the adaptive budget: physical minimum requirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseC {
    pub required_min_size: u64,
    /// Overlap between consecutive chunks, in decimated samples (O_d)
    pub overlap_decimated: u64,
}

/// Outcome of the chunk size planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkCalculation {
    /// Final chunk size (N_c)
    pub final_chunk_samples: u64,
    /// Whether N_c is an exact multiple of the slice length. Computed upstream.
    #[serde(default)]
    pub aligned_to_slice: bool,
    /// Budget branch taken by the planner, in lowercase (e.g. "ideal")
    pub scenario: String,
    pub phase_a: PhaseA,
    pub phase_b: PhaseB,
    pub phase_c: PhaseC,
}

/// Dispersion measure search cube
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DmCube {
    /// Kept as the raw JSON number so integers and floats print as written
    pub dm_max: Number,
    pub delta_t_max_seconds: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlapValidation {
    #[serde(default)]
    pub overlap_sufficient: bool,
}

/// Measurements taken while the file was processed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActualProcessing {
    pub peak_memory_usage_gb: f64,
}

/// One parsed `validation_component1_*.json` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRecord {
    /// Observation file the record describes; unique within a run
    pub file_name: String,
    pub data_characteristics: DataCharacteristics,
    pub memory_budget: MemoryBudget,
    pub chunk_calculation: ChunkCalculation,
    pub dm_cube: DmCube,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlap_validation: Option<OverlapValidation>,
    pub actual_processing: ActualProcessing,
    /// Chunk descriptors; only the count is used
    #[serde(default)]
    pub chunks: Vec<Value>,
}

impl ValidationRecord {
    /// File name without directories or extension, as shown in tables and plots
    pub fn file_stem(&self) -> String {
        Path::new(&self.file_name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_name.clone())
    }

    /// Measured and budgeted quantities that are stored as floats, by JSON path
    pub fn float_fields(&self) -> [(&'static str, f64); 5] {
        [
            ("memory_budget.available_ram_gb", self.memory_budget.available_ram_gb),
            ("memory_budget.total_usable_gb", self.memory_budget.total_usable_gb),
            (
                "chunk_calculation.phase_a.cost_per_sample_bytes",
                self.chunk_calculation.phase_a.cost_per_sample_bytes,
            ),
            ("dm_cube.delta_t_max_seconds", self.dm_cube.delta_t_max_seconds),
            (
                "actual_processing.peak_memory_usage_gb",
                self.actual_processing.peak_memory_usage_gb,
            ),
        ]
    }

    /// First float field holding a negative or non-finite value, if any
    ///
    /// Counts are unsigned and rejected by the deserializer; floats need this check.
    pub fn invalid_float_field(&self) -> Option<(&'static str, f64)> {
        self.float_fields()
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
    }

    /// Upstream verdict on chunk overlap; absent validation counts as insufficient
    pub fn overlap_sufficient(&self) -> bool {
        self.overlap_validation
            .as_ref()
            .is_some_and(|validation| validation.overlap_sufficient)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_file_stem() {
        let record = sample_record("/data/FAST/FRB20121102_0001.fits");
        assert_eq!(record.file_stem(), "FRB20121102_0001");

        let record = sample_record("3096");
        assert_eq!(record.file_stem(), "3096");
    }

    #[test]
    fn test_optional_fields_default() {
        let mut value = sample_json("a.fits");
        let object = value.as_object_mut().unwrap();
        object.remove("overlap_validation");
        object.remove("chunks");
        object["chunk_calculation"]
            .as_object_mut()
            .unwrap()
            .remove("aligned_to_slice");

        let record: ValidationRecord = serde_json::from_value(value).unwrap();
        assert!(record.overlap_validation.is_none());
        assert!(!record.overlap_sufficient());
        assert!(record.chunks.is_empty());
        assert!(!record.chunk_calculation.aligned_to_slice);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let mut value = sample_json("a.fits");
        value.as_object_mut().unwrap().remove("dm_cube");
        assert!(serde_json::from_value::<ValidationRecord>(value).is_err());
    }

    #[test]
    fn test_negative_count_is_rejected() {
        let mut value = sample_json("a.fits");
        value["data_characteristics"]["decimated_samples"] = serde_json::json!(-1);
        assert!(serde_json::from_value::<ValidationRecord>(value).is_err());
    }

    #[test]
    fn test_invalid_float_field() {
        assert_eq!(sample_record("a.fits").invalid_float_field(), None);

        let mut record = sample_record("a.fits");
        record.actual_processing.peak_memory_usage_gb = -1.0;
        assert_eq!(
            record.invalid_float_field(),
            Some(("actual_processing.peak_memory_usage_gb", -1.0))
        );

        let mut record = sample_record("a.fits");
        record.memory_budget.total_usable_gb = -0.5;
        record.dm_cube.delta_t_max_seconds = -2.0;
        assert_eq!(
            record.invalid_float_field(),
            Some(("memory_budget.total_usable_gb", -0.5))
        );

        // Zero is a valid measurement
        let mut record = sample_record("a.fits");
        record.chunk_calculation.phase_a.cost_per_sample_bytes = 0.0;
        assert_eq!(record.invalid_float_field(), None);
    }

    #[test]
    fn test_dm_max_keeps_number_form() {
        let record = sample_record("a.fits");
        assert_eq!(record.dm_cube.dm_max.to_string(), "2000");

        let mut value = sample_json("a.fits");
        value["dm_cube"]["dm_max"] = serde_json::json!(2000.0);
        let record: ValidationRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.dm_cube.dm_max.to_string(), "2000.0");
    }
}
