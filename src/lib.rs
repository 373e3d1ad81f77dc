//! emstat - incident counts by weekday and hour of day
//!
//! This library loads emergency-incident CSV exports and reduces them to two
//! fixed-shape histograms (7 weekday buckets, 24 zero-filled hour buckets),
//! plus the patient-weighted point list a heatmap overlay needs.
//!
//! ```
//! use emstat::histogram::{aggregate, label_weekday};
//! use emstat::loader::RecordLoader;
//!
//! let csv = "Incident Time,Total Patients\n2015-03-18 03:10:00,1\n2015-03-18 17:45:00,2\n";
//! let loaded = RecordLoader::default().load_reader(csv.as_bytes()).unwrap();
//! let summary = aggregate(&loaded.records);
//!
//! assert_eq!(summary.weekday.counts(), &[0, 0, 2, 0, 0, 0, 0]);
//! assert_eq!(summary.hour[3], 1);
//! assert_eq!(label_weekday(2).unwrap(), "Wed");
//! ```

pub mod cli;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod heatmap;
pub mod histogram;
pub mod json_output;
pub mod loader;
pub mod record;
pub mod text_output;
pub mod timestamp;

pub use error::{EmstatError, Result};
pub use record::IncidentRecord;
