//! Error types
//!
//! The stepping loop itself cannot fail; errors only arise when loading
//! configuration or exporting recorded trajectories.

use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Parameter `{name}` must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("Parameter `{name}` must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("Parameter `{name}` must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    #[error("Substep count must be at least 1")]
    NoSubsteps,
}

/// Trajectory export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error during export: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error during export: {0}")]
    Csv(#[from] csv::Error),

    #[error("Nothing recorded")]
    Empty,
}
