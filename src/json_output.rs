//! JSON output format for incident histograms and heat points

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::heatmap::{HeatLayer, HeatPoint};
use crate::histogram::{label_weekday, HourHistogram, TemporalSummary, WeekdayHistogram};
use crate::loader::LoadedIncidents;

/// One weekday bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonWeekdayBucket {
    /// Weekday index, 0 = Monday
    pub index: usize,
    pub label: String,
    pub count: u64,
}

/// Record accounting for a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonSummary {
    /// Data rows read from the CSV
    pub records_read: usize,
    /// Records that landed in the histograms
    pub records_counted: u64,
    /// Records without a parseable incident time
    pub records_skipped: u64,
    /// Rows the CSV reader could not decode
    pub row_errors: usize,
}

/// Histogram report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    pub version: String,
    pub format: String,
    pub summary: JsonSummary,
    /// Seven buckets in index order, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<Vec<JsonWeekdayBucket>>,
    /// Twenty-four counts in hour order, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<Vec<u64>>,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "emstat-json-v1".to_string(),
            summary: JsonSummary::default(),
            weekday: None,
            hour: None,
        }
    }

    /// Fill the summary from loader and aggregation accounting
    pub fn set_summary(&mut self, loaded: &LoadedIncidents, summary: &TemporalSummary) {
        self.summary = JsonSummary {
            records_read: loaded.rows_read,
            records_counted: summary.counted,
            records_skipped: summary.skipped,
            row_errors: loaded.row_errors.len(),
        };
    }

    pub fn set_weekday(&mut self, histogram: &WeekdayHistogram) -> Result<()> {
        let buckets = histogram
            .iter()
            .map(|(index, count)| -> Result<JsonWeekdayBucket> {
                Ok(JsonWeekdayBucket {
                    index,
                    label: label_weekday(index)?.to_string(),
                    count,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        self.weekday = Some(buckets);
        Ok(())
    }

    pub fn set_hour(&mut self, histogram: &HourHistogram) {
        self.hour = Some(histogram.as_slice().to_vec());
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

/// Heat layer report
#[derive(Debug, Clone, Serialize)]
pub struct JsonHeatOutput {
    pub version: String,
    pub format: String,
    pub points: Vec<HeatPoint>,
    /// Records missing a coordinate or patient count
    pub excluded: usize,
    pub total_weight: u64,
}

impl JsonHeatOutput {
    pub fn new(layer: &HeatLayer) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "emstat-heatmap-v1".to_string(),
            points: layer.points.clone(),
            excluded: layer.excluded,
            total_weight: layer.total_weight(),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
