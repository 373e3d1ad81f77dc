//! Human-readable tables for incident histograms
//!
//! Layout follows the `strace -c` summary: one row per bucket with its share
//! of the total, a separator, then a total line.

use crate::error::Result;
use crate::heatmap::HeatLayer;
use crate::histogram::{label_weekday, HourHistogram, WeekdayHistogram};

const SEPARATOR: &str = "------ --------- -------";

/// Percentage of `total` taken by `count`; 0 when there is nothing to share
pub fn share(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (count as f64 / total as f64) * 100.0
    }
}

/// Builds the text report section by section
#[derive(Debug, Default)]
pub struct TextReport {
    out: String,
}

impl TextReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weekday table, Monday first
    pub fn add_weekday(&mut self, histogram: &WeekdayHistogram) -> Result<()> {
        let total = histogram.total();
        self.section_break();
        self.line("Incidents by weekday");
        self.line(&format!("{:<6} {:>9} {:>7}", "day", "incidents", "%"));
        self.line(SEPARATOR);
        for (index, count) in histogram.iter() {
            let label = label_weekday(index)?;
            self.line(&format!("{:<6} {:>9} {:>7.2}", label, count, share(count, total)));
        }
        self.footer(total);
        if let Some(peak) = histogram.peak() {
            self.line(&format!("busiest day: {}", label_weekday(peak)?));
        }
        Ok(())
    }

    /// Hour-of-day table, all 24 hours
    pub fn add_hour(&mut self, histogram: &HourHistogram) {
        let total = histogram.total();
        self.section_break();
        self.line("Incidents by hour");
        self.line(&format!("{:<6} {:>9} {:>7}", "hour", "incidents", "%"));
        self.line(SEPARATOR);
        for (hour, count) in histogram.iter() {
            let hour_label = format!("{:02}", hour);
            self.line(&format!(
                "{:<6} {:>9} {:>7.2}",
                hour_label,
                count,
                share(count, total)
            ));
        }
        self.footer(total);
        if let Some(peak) = histogram.peak() {
            self.line(&format!("busiest hour: {:02}:00", peak));
        }
    }

    /// Heat point listing
    pub fn add_heat_layer(&mut self, layer: &HeatLayer) {
        self.section_break();
        self.line(&format!("{:>12} {:>12} {:>7}", "latitude", "longitude", "weight"));
        for point in &layer.points {
            self.line(&format!(
                "{:>12.6} {:>12.6} {:>7}",
                point.latitude, point.longitude, point.weight
            ));
        }
        self.line(&format!(
            "{} point(s), total weight {}, {} record(s) without location or patient count",
            layer.points.len(),
            layer.total_weight(),
            layer.excluded
        ));
    }

    pub fn render(&self) -> &str {
        &self.out
    }

    fn footer(&mut self, total: u64) {
        self.line(SEPARATOR);
        let percent = if total > 0 { 100.0 } else { 0.0 };
        self.line(&format!("{:<6} {:>9} {:>7.2}", "total", total, percent));
    }

    fn section_break(&mut self) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }
}
