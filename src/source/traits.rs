//! Trait definitions for snapshot acquisition

use crate::domain::ParameterSnapshot;
use crate::error::SnapshotError;

/// Source of parameter readings
///
/// Called once per monitoring tick.
pub trait SnapshotSource: Send + Sync {
    /// Read the latest snapshot
    fn read(&self) -> Result<ParameterSnapshot, SnapshotError>;

    /// Source description for logs
    fn describe(&self) -> String;
}
