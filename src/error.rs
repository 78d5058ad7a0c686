//! Unified error types for reefwatch
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.
//!
//! The alert core itself never fails: evaluation, reconciliation and
//! dismissal degrade to "no alert" instead of returning errors. These types
//! cover the I/O edges (settings files, snapshot sources, notification
//! channels, CLI).

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error reading a parameter snapshot
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Failed to parse config file
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Settings field that does not exist
    #[error("Unknown settings field: {0}")]
    UnknownField(String),

    /// Config file exists but could not be read
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Errors from parameter snapshot sources
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Source could not be read (file missing, device unreachable)
    #[error("Snapshot source unavailable: {0}")]
    Unavailable(String),

    /// Source content is not a valid snapshot document
    #[error("Malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors from notification channels
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Channel could not deliver the notification
    #[error("Channel '{channel}' failed: {message}")]
    ChannelFailed { channel: String, message: String },

    /// Output stream error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
