//! Loading and ordering of validation records
//!
//! This module handles discovering the `validation_component1_*.json` files in a
//! results directory, parsing each one into a [`ValidationRecord`], and ordering the
//! records so every table and plot lists files in the same order.

use crate::common::ValidationRecord;
use bytesize::ByteSize;
use glob::Pattern;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// File name pattern of the records written by the validation metrics collector
pub const RECORD_FILE_PATTERN: &str = "validation_component1_*.json";

/// Errors that abort loading as a whole
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("Failed to read results directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid record file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Errors for a single record file; the file is skipped and loading continues
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read input file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Field {field} must be a non-negative number, found {value}")]
    InvalidField { field: &'static str, value: f64 },
}

type Result<T> = core::result::Result<T, ParsingError>;

/// A record file that could not be loaded
#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: LoadError,
}

/// Outcome of loading a results directory
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Fully parsed records, in discovery order
    pub records: Vec<ValidationRecord>,
    /// Files that were skipped, one entry per logged diagnostic
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Lists the record files in `results_dir`, sorted by path
///
/// Only regular files whose name matches [`RECORD_FILE_PATTERN`] are returned. Names
/// that are not valid UTF-8 are matched lossily. Directory entries that cannot be
/// read are logged and left out.
pub fn find_record_files(results_dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = Pattern::new(RECORD_FILE_PATTERN)?;
    let entries = fs::read_dir(results_dir).map_err(|source| ParsingError::DirectoryRead {
        path: results_dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(error) => {
                warn!(dir = %results_dir.display(), %error, "unreadable directory entry");
                continue;
            }
        };

        let Some(name) = path.file_name() else {
            continue;
        };
        let name = name.to_string_lossy();
        if !pattern.matches(&name) {
            continue;
        }
        if !path.is_file() {
            debug!(path = %path.display(), "ignoring non-file match");
            continue;
        }
        if name.contains(char::REPLACEMENT_CHARACTER) {
            debug!(path = %path.display(), "record file name is not valid UTF-8");
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}

/// Parses a single record file
///
/// A record is either returned whole or not at all. Besides the shape checks done by
/// deserialization, every float field must be finite and non-negative.
pub fn load_record(path: &Path) -> core::result::Result<ValidationRecord, LoadError> {
    let file = File::open(path)?;
    let size = file.metadata().map(|metadata| metadata.len()).unwrap_or(0);
    let record: ValidationRecord = serde_json::from_reader(BufReader::new(file))?;
    if let Some((field, value)) = record.invalid_float_field() {
        return Err(LoadError::InvalidField { field, value });
    }
    debug!(path = %path.display(), size = %ByteSize(size), "loaded validation record");
    Ok(record)
}

/// Loads every record file in a results directory
///
/// Files that fail to read, parse or validate are logged once each, listed in
/// [`LoadReport::failures`] and excluded; the remaining files are still loaded.
///
/// # Arguments
/// * `results_dir` - Directory containing `validation_component1_*.json` files
///
/// # Returns
/// * `Ok(LoadReport)` - Parsed records plus the files that were skipped
/// * `Err(ParsingError)` - If the directory itself could not be read
pub fn load_validation_records(results_dir: &Path) -> Result<LoadReport> {
    let files = find_record_files(results_dir)?;
    let progress = loading_progress(files.len() as u64);
    let mut report = LoadReport::default();

    for path in files {
        progress.set_message(display_name(&path));
        match load_record(&path) {
            Ok(record) => report.records.push(record),
            Err(error) => {
                progress.suspend(|| {
                    warn!(path = %path.display(), %error, "skipping validation record");
                });
                report.failures.push(LoadFailure { path, error });
            }
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(report)
}

/// Orders records by `file_name`
///
/// The sort is stable, so records sharing a name keep their relative order.
pub fn sort_records(mut records: Vec<ValidationRecord>) -> Vec<ValidationRecord> {
    records.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    records
}

fn loading_progress(len: u64) -> ProgressBar {
    let progress = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner} Loading records [{bar:30}] {pos}/{len} {msg}")
    {
        progress.set_style(style.progress_chars("=> "));
    }
    progress
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
