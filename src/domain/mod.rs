//! Domain models for reefwatch
//!
//! Monitored parameters, reading snapshots and unit normalization.

pub mod parameter;
pub mod salinity;

pub use parameter::{Parameter, ParameterSnapshot};
pub use salinity::{normalize_salinity, RAW_SCALE_THRESHOLD};
