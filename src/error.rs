//! Error types for incident loading and aggregation

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the emstat library
#[derive(Error, Debug)]
pub enum EmstatError {
    /// Weekday label requested for an index outside 0..=6
    #[error("Invalid weekday index: {index} (expected 0..=6)")]
    InvalidIndex { index: usize },

    /// A required CSV column is not present in the header row
    #[error("Missing required column '{name}' in CSV header")]
    MissingColumn { name: String },

    /// Records without a parseable timestamp under strict mode
    #[error("{count} record(s) have a missing or unparsable timestamp")]
    MalformedTimestamps { count: usize },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for emstat operations
pub type Result<T> = std::result::Result<T, EmstatError>;
