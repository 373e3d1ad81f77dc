//! Loader configuration: CSV column names and timestamp layouts
//!
//! Every key is optional. An empty file (or no file at all) yields the column
//! names used by the SXSW EMS export.
//!
//! # Example
//! ```
//! use emstat::config::EmstatConfig;
//!
//! let config = EmstatConfig::from_toml_str(
//!     r#"
//!     [columns]
//!     timestamp = "Call Time"
//!
//!     [timestamps]
//!     formats = ["%d.%m.%Y %H:%M"]
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.columns.timestamp, "Call Time");
//! assert_eq!(config.columns.latitude, "Location Latitude");
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EmstatError, Result};
use crate::timestamp::TimestampParser;

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmstatConfig {
    pub columns: ColumnConfig,
    pub timestamps: TimestampConfig,
}

/// Header names for each incident field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnConfig {
    /// Incident time (required in the CSV)
    pub timestamp: String,
    pub latitude: String,
    pub longitude: String,
    /// Patient count, used as heatmap weight
    pub patients: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            timestamp: "Incident Time".to_string(),
            latitude: "Location Latitude".to_string(),
            longitude: "Location Longitude".to_string(),
            patients: "Total Patients".to_string(),
        }
    }
}

/// Extra `chrono` layouts tried before the built-in ones
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimestampConfig {
    pub formats: Vec<String>,
}

impl TimestampConfig {
    /// Build the parser for these layouts
    pub fn parser(&self) -> TimestampParser {
        TimestampParser::with_formats(self.formats.iter().cloned())
    }
}

impl EmstatConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| EmstatError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
