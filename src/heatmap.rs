//! Weighted incident locations for a heatmap overlay
//!
//! Produces the `(latitude, longitude, weight)` triples a map layer consumes,
//! weighting each located incident by its patient count. Drawing the layer is
//! left to the consumer.

use serde::Serialize;

use crate::record::IncidentRecord;

/// One located incident and its weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Patients involved in the incident
    pub weight: u32,
}

/// Heat points plus the number of records that could not be placed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatLayer {
    pub points: Vec<HeatPoint>,
    /// Records missing a coordinate or a patient count
    pub excluded: usize,
}

impl HeatLayer {
    /// Sum of all point weights
    pub fn total_weight(&self) -> u64 {
        self.points.iter().map(|p| u64::from(p.weight)).sum()
    }
}

/// Heat point for a record with both coordinates and a patient count
pub fn heat_point(record: &IncidentRecord) -> Option<HeatPoint> {
    let (latitude, longitude) = record.location()?;
    let weight = record.patient_count?;
    Some(HeatPoint {
        latitude,
        longitude,
        weight,
    })
}

/// Build the heat layer for a set of incidents, preserving input order
pub fn heat_points(records: &[IncidentRecord]) -> HeatLayer {
    let points: Vec<HeatPoint> = records.iter().filter_map(heat_point).collect();
    HeatLayer {
        excluded: records.len() - points.len(),
        points,
    }
}
