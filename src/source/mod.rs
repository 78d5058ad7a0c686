//! Parameter acquisition layer
//!
//! Abstracts where readings come from (device polling, a file dropped by
//! the dashboard, fixed values from the command line) behind
//! [`SnapshotSource`] so the monitor can be tested with mocks.

mod file;
mod traits;

pub use file::{FileSnapshotSource, StaticSnapshotSource};
pub use traits::SnapshotSource;
