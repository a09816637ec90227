//! Training data serialization.
//!
//! Records are written as `[["text", {"entities": [[start, end, "LABEL"], ...]}], ...]`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::models::TrainingRecord;

pub fn to_json_string(records: &[TrainingRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// Write training records to `path`, replacing any existing file.
pub fn save_training_data(records: &[TrainingRecord], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| ConvertError::file_access(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, records).map_err(|e| ConvertError::from_json(path, e))?;
    writer
        .flush()
        .map_err(|e| ConvertError::file_access(path, e))?;
    tracing::info!("Wrote {} training records to {}", records.len(), path.display());
    Ok(())
}

/// Read records previously written by [`save_training_data`].
pub fn read_training_data(path: impl AsRef<Path>) -> Result<Vec<TrainingRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ConvertError::file_access(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| ConvertError::from_json(path, e))
}
