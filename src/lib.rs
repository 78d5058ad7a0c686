//! reefwatch - aquarium water-parameter alert engine
//!
//! This library evaluates temperature, pH, salinity and TDS readings
//! against user thresholds, keeps a bounded and de-duplicated list of live
//! alerts, and dispatches visible and audible notifications.
//!
//! # Modules
//!
//! - [`alerts`]: Condition evaluation, alert lifecycle and notifications
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Tool configuration system
//! - [`domain`]: Parameters, snapshots and salinity normalization
//! - [`error`]: Error types
//! - [`services`]: Alert service and monitoring loop
//! - [`settings`]: Threshold settings, persistence and change watching
//! - [`source`]: Parameter snapshot sources

pub mod alerts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod settings;
pub mod source;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{AppError, Result};
