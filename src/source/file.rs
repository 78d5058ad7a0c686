//! Built-in snapshot sources

use super::SnapshotSource;
use crate::domain::ParameterSnapshot;
use crate::error::SnapshotError;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads the latest snapshot from a JSON file
///
/// The file holds `{"temperature": .., "ph": .., "salinity": .., "tds": ..}`
/// and is rewritten by the acquisition side on each poll. Missing fields
/// are treated as absent readings.
#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    /// Create a source for the given file
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for FileSnapshotSource {
    fn read(&self) -> Result<ParameterSnapshot, SnapshotError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            SnapshotError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Always returns the same snapshot
#[derive(Debug, Clone, Copy)]
pub struct StaticSnapshotSource {
    snapshot: ParameterSnapshot,
}

impl StaticSnapshotSource {
    /// Create a source for fixed readings
    pub fn new(snapshot: ParameterSnapshot) -> Self {
        Self { snapshot }
    }
}

impl SnapshotSource for StaticSnapshotSource {
    fn read(&self) -> Result<ParameterSnapshot, SnapshotError> {
        Ok(self.snapshot)
    }

    fn describe(&self) -> String {
        "static readings".to_string()
    }
}
