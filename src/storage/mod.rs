// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::utils::error::StorageError;

pub const DEFAULT_OUTPUT: &str = "testoutput.csv";

/// Writes extraction results to a single CSV file.
pub struct CsvWriter {
    path: PathBuf,
}

impl CsvWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Replaces the file's contents with `records`, one line each.
    /// Records are written as given; the caller supplies the header.
    pub fn write(&self, records: &[Vec<String>]) -> Result<PathBuf, StorageError> {
        // Create the parent directory if it doesn't exist
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::WriterBuilder::new()
            .flexible(false)
            .from_path(&self.path)?;
        for record in records {
            writer.write_record(record)?;
        }
        writer.flush()?;

        tracing::info!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(self.path.clone())
    }
}
