//! CLI argument parsing for emstat

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::EmstatConfig;

/// Output format for histograms and heat points
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

/// Which histograms to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Breakdown {
    /// Incidents per weekday only
    Weekday,
    /// Incidents per hour of day only
    Hour,
    /// Both histograms
    All,
}

impl Breakdown {
    pub fn includes_weekday(self) -> bool {
        matches!(self, Breakdown::Weekday | Breakdown::All)
    }

    pub fn includes_hour(self) -> bool {
        matches!(self, Breakdown::Hour | Breakdown::All)
    }
}

#[derive(Parser, Debug)]
#[command(name = "emstat")]
#[command(version)]
#[command(about = "Incident counts by weekday and hour of day from EMS CSV exports", long_about = None)]
pub struct Cli {
    /// Incident CSV file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// TOML file with column names and extra timestamp formats
    #[arg(short = 'C', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Column holding the incident time
    #[arg(long = "time-column", value_name = "NAME")]
    pub time_column: Option<String>,

    /// Column holding the latitude
    #[arg(long = "lat-column", value_name = "NAME")]
    pub lat_column: Option<String>,

    /// Column holding the longitude
    #[arg(long = "lon-column", value_name = "NAME")]
    pub lon_column: Option<String>,

    /// Column holding the patient count
    #[arg(long = "patients-column", value_name = "NAME")]
    pub patients_column: Option<String>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Histograms to emit
    #[arg(long = "by", value_enum, default_value = "all")]
    pub by: Breakdown,

    /// Emit patient-weighted incident locations instead of histograms
    #[arg(long = "heatmap")]
    pub heatmap: bool,

    /// Fail when any record lacks a parseable incident time (histograms only)
    #[arg(long = "strict")]
    pub strict: bool,

    /// Enable debug diagnostics on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Apply column-name flags on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut EmstatConfig) {
        let columns = &mut config.columns;
        let overrides = [
            (&self.time_column, &mut columns.timestamp),
            (&self.lat_column, &mut columns.latitude),
            (&self.lon_column, &mut columns.longitude),
            (&self.patients_column, &mut columns.patients),
        ];
        for (flag, column) in overrides {
            if let Some(name) = flag {
                *column = name.clone();
            }
        }
    }
}
