//! Incident records as produced by the loader

use chrono::{NaiveDateTime, Timelike};

use crate::histogram::weekday_index;

/// A single emergency incident
///
/// Built once at load time and never mutated. Any field may be missing in the
/// source data; a record without a timestamp is excluded from the temporal
/// histograms.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IncidentRecord {
    /// Incident time as written in the source (no timezone normalization)
    pub timestamp: Option<NaiveDateTime>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Number of patients involved
    pub patient_count: Option<u32>,
}

impl IncidentRecord {
    /// Create a record with only a timestamp
    pub fn new(timestamp: Option<NaiveDateTime>) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    /// Attach a location
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Attach a patient count
    pub fn with_patients(mut self, patient_count: u32) -> Self {
        self.patient_count = Some(patient_count);
        self
    }

    /// Weekday index of the incident (0 = Monday)
    pub fn weekday_index(&self) -> Option<usize> {
        self.timestamp.as_ref().map(weekday_index)
    }

    /// Hour of day of the incident (0..=23)
    pub fn hour(&self) -> Option<usize> {
        self.timestamp.map(|ts| ts.hour() as usize)
    }

    /// Both coordinates, if present
    pub fn location(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}
