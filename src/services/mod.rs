//! Service layer for aquarium monitoring
//!
//! Services combine the alert core with settings and acquisition into the
//! operations the CLI and embedders call.

pub mod alert_service;
pub mod monitor;

pub use alert_service::AlertService;
pub use monitor::{Monitor, MonitorConfig};
