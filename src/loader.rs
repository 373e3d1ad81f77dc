//! CSV ingest of incident records
//!
//! The loader resolves configured column names against the header row, then
//! turns each row into an [`IncidentRecord`]. Only the timestamp column is
//! required. Cells that fail to parse become `None` on the record rather than
//! aborting the load; rows the CSV reader itself cannot decode are reported as
//! [`RowError`]s and skipped.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, warn};

use crate::config::{ColumnConfig, EmstatConfig};
use crate::error::{EmstatError, Result};
use crate::record::IncidentRecord;
use crate::timestamp::TimestampParser;

/// A row the CSV reader could not decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based line number in the source file
    pub line: usize,
    pub message: String,
}

/// Loader output: records plus row-level diagnostics
#[derive(Debug, Clone, Default)]
pub struct LoadedIncidents {
    pub records: Vec<IncidentRecord>,
    /// Data rows seen, including those that failed to decode
    pub rows_read: usize,
    pub row_errors: Vec<RowError>,
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    timestamp: usize,
    latitude: Option<usize>,
    longitude: Option<usize>,
    patients: Option<usize>,
}

/// Reads incident CSV files according to an [`EmstatConfig`]
#[derive(Debug, Clone)]
pub struct RecordLoader {
    columns: ColumnConfig,
    parser: TimestampParser,
}

impl Default for RecordLoader {
    fn default() -> Self {
        Self::new(&EmstatConfig::default())
    }
}

impl RecordLoader {
    pub fn new(config: &EmstatConfig) -> Self {
        Self {
            columns: config.columns.clone(),
            parser: config.timestamps.parser(),
        }
    }

    /// Load incidents from a CSV file on disk
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<LoadedIncidents> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| EmstatError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading incidents");
        self.load_reader(file)
    }

    /// Load incidents from any CSV byte stream
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<LoadedIncidents> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let index = self.resolve_columns(&headers)?;

        let mut loaded = LoadedIncidents::default();
        for (idx, result) in reader.records().enumerate() {
            loaded.rows_read += 1;
            match result {
                Ok(row) => loaded.records.push(self.parse_row(&row, index)),
                Err(e) => {
                    // records() starts after the header, lines are 1-based
                    let line = e
                        .position()
                        .map(|p| p.line() as usize)
                        .unwrap_or(idx + 2);
                    warn!(line, error = %e, "skipping undecodable row");
                    loaded.row_errors.push(RowError {
                        line,
                        message: e.to_string(),
                    });
                }
            }
        }

        debug!(
            rows = loaded.rows_read,
            records = loaded.records.len(),
            errors = loaded.row_errors.len(),
            "incidents loaded"
        );
        Ok(loaded)
    }

    fn resolve_columns(&self, headers: &StringRecord) -> Result<ColumnIndex> {
        let header_map = build_header_map(headers);
        let lookup = |name: &str| header_map.get(&normalize_header_name(name)).copied();

        let timestamp =
            lookup(self.columns.timestamp.as_str()).ok_or_else(|| EmstatError::MissingColumn {
                name: self.columns.timestamp.clone(),
            })?;

        let optional = |name: &str| {
            let found = lookup(name);
            if found.is_none() {
                warn!(column = name, "column not found, field will be empty");
            }
            found
        };

        Ok(ColumnIndex {
            timestamp,
            latitude: optional(self.columns.latitude.as_str()),
            longitude: optional(self.columns.longitude.as_str()),
            patients: optional(self.columns.patients.as_str()),
        })
    }

    fn parse_row(&self, row: &StringRecord, index: ColumnIndex) -> IncidentRecord {
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).filter(|s| !s.is_empty());

        let timestamp = cell(Some(index.timestamp)).and_then(|raw| {
            let parsed = self.parser.parse(raw);
            if parsed.is_none() {
                debug!(value = raw, "unparsable incident time");
            }
            parsed
        });

        IncidentRecord {
            timestamp,
            latitude: cell(index.latitude).and_then(parse_coordinate),
            longitude: cell(index.longitude).and_then(parse_coordinate),
            patient_count: cell(index.patients).and_then(parse_patient_count),
        }
    }
}

/// Map header names to positions; a repeated name resolves to its first column
fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .fold(HashMap::new(), |mut map, (idx, name)| {
            let name = normalize_header_name(name);
            if let Some(first) = map.get(&name).copied() {
                warn!(column = %name, first, ignored = idx, "duplicate column header");
            } else {
                map.insert(name, idx);
            }
            map
        })
}

/// Trim and drop a UTF-8 BOM that spreadsheet exports put on the first header
fn normalize_header_name(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_string()
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Non-negative integer; integral floats such as `2.0` are accepted
fn parse_patient_count(raw: &str) -> Option<u32> {
    if let Ok(count) = raw.parse::<u32>() {
        return Some(count);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}
