//! CSV output format for incident histograms and heat points

use crate::error::Result;
use crate::heatmap::HeatLayer;
use crate::histogram::{label_weekday, HourHistogram, WeekdayHistogram};

/// CSV record for a single histogram bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvBucket {
    /// `weekday` or `hour`
    pub histogram: &'static str,
    pub index: usize,
    pub label: String,
    pub incidents: u64,
}

/// CSV histogram output formatter
#[derive(Debug, Default)]
pub struct CsvOutput {
    buckets: Vec<CsvBucket>,
}

impl CsvOutput {
    /// Create a new CSV output formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the seven weekday buckets
    pub fn add_weekday(&mut self, histogram: &WeekdayHistogram) -> Result<()> {
        for (index, count) in histogram.iter() {
            self.buckets.push(CsvBucket {
                histogram: "weekday",
                index,
                label: label_weekday(index)?.to_string(),
                incidents: count,
            });
        }
        Ok(())
    }

    /// Append the 24 hour buckets, labeled `00`..`23`
    pub fn add_hour(&mut self, histogram: &HourHistogram) {
        for (hour, count) in histogram.iter() {
            self.buckets.push(CsvBucket {
                histogram: "hour",
                index: hour,
                label: format!("{:02}", hour),
                incidents: count,
            });
        }
    }

    fn header() -> &'static str {
        "histogram,index,label,incidents"
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(Self::header());
        output.push('\n');

        for bucket in &self.buckets {
            output.push_str(&format!(
                "{},{},{},{}\n",
                bucket.histogram, bucket.index, bucket.label, bucket.incidents
            ));
        }

        output
    }
}

/// CSV heat point output formatter
#[derive(Debug)]
pub struct CsvHeatOutput<'a> {
    layer: &'a HeatLayer,
}

impl<'a> CsvHeatOutput<'a> {
    pub fn new(layer: &'a HeatLayer) -> Self {
        Self { layer }
    }

    /// Generate `latitude,longitude,weight` rows
    pub fn to_csv(&self) -> String {
        let mut output = String::from("latitude,longitude,weight\n");

        for point in &self.layer.points {
            output.push_str(&point.latitude.to_string());
            output.push(',');
            output.push_str(&point.longitude.to_string());
            output.push(',');
            output.push_str(&point.weight.to_string());
            output.push('\n');
        }

        output
    }
}
