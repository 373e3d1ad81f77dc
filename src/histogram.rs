//! Temporal aggregation of incidents into weekday and hour-of-day histograms
//!
//! Both histograms have a fixed shape: 7 weekday buckets and 24 hour buckets,
//! every bucket present even when no incident falls into it. Records without a
//! timestamp are counted as skipped and contribute to neither histogram.

use std::collections::BTreeMap;
use std::ops::Index;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use tracing::debug;

use crate::error::{EmstatError, Result};
use crate::record::IncidentRecord;

/// Number of weekday buckets
pub const DAYS_PER_WEEK: usize = 7;

/// Number of hour-of-day buckets
pub const HOURS_PER_DAY: usize = 24;

/// Weekday that maps to bucket index 0
///
/// Indices run Monday = 0 through Sunday = 6 (ISO order). Ecosystems that
/// count from Sunday must shift before comparing results.
pub const WEEK_STARTS_ON: Weekday = Weekday::Mon;

/// Presentation labels aligned with weekday indices
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] =
    ["Mon", "Tue", "Wed", "Thurs", "Fri", "Sat", "Sun"];

/// Bucket index of a timestamp's weekday, relative to [`WEEK_STARTS_ON`]
pub fn weekday_index(timestamp: &NaiveDateTime) -> usize {
    let day = timestamp.weekday().num_days_from_monday() as usize;
    let start = WEEK_STARTS_ON.num_days_from_monday() as usize;
    (day + DAYS_PER_WEEK - start) % DAYS_PER_WEEK
}

/// Label for a weekday index
///
/// # Errors
///
/// Returns [`EmstatError::InvalidIndex`] when `index` is not in `0..=6`.
pub fn label_weekday(index: usize) -> Result<&'static str> {
    WEEKDAY_LABELS
        .get(index)
        .copied()
        .ok_or(EmstatError::InvalidIndex { index })
}

/// Incident counts per weekday, index 0 = Monday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekdayHistogram {
    counts: [u64; DAYS_PER_WEEK],
}

impl WeekdayHistogram {
    /// Count for one weekday, `None` outside `0..=6`
    pub fn get(&self, index: usize) -> Option<u64> {
        self.counts.get(index).copied()
    }

    /// All seven counts in index order
    pub fn counts(&self) -> &[u64; DAYS_PER_WEEK] {
        &self.counts
    }

    /// `(index, count)` pairs in ascending index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.counts.iter().copied().enumerate()
    }

    /// Sum of all buckets
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Index of the busiest weekday (lowest index wins ties), `None` when empty
    pub fn peak(&self) -> Option<usize> {
        peak_of(&self.counts)
    }
}

impl Index<usize> for WeekdayHistogram {
    type Output = u64;

    fn index(&self, index: usize) -> &u64 {
        &self.counts[index]
    }
}

/// Incident counts per hour of day, always 24 entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HourHistogram {
    counts: [u64; HOURS_PER_DAY],
}

impl HourHistogram {
    /// Materialize a dense histogram from sparse hour counts
    ///
    /// Hours absent from `sparse` are filled with zero. Keys outside `0..=23`
    /// are ignored.
    pub fn from_sparse(sparse: &BTreeMap<usize, u64>) -> Self {
        let mut counts = [0; HOURS_PER_DAY];
        for (&hour, &count) in sparse.range(0..HOURS_PER_DAY) {
            counts[hour] = count;
        }
        Self { counts }
    }

    /// Count for one hour, `None` outside `0..=23`
    pub fn get(&self, hour: usize) -> Option<u64> {
        self.counts.get(hour).copied()
    }

    /// The 24 counts in hour order
    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }

    /// `(hour, count)` pairs in ascending hour order
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.counts.iter().copied().enumerate()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Busiest hour (earliest wins ties), `None` when empty
    pub fn peak(&self) -> Option<usize> {
        peak_of(&self.counts)
    }
}

impl Index<usize> for HourHistogram {
    type Output = u64;

    fn index(&self, hour: usize) -> &u64 {
        &self.counts[hour]
    }
}

fn peak_of(counts: &[u64]) -> Option<usize> {
    let max = counts.iter().copied().max().filter(|&m| m > 0)?;
    counts.iter().position(|&c| c == max)
}

/// Both histograms from a single pass, with the number of records left out
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemporalSummary {
    pub weekday: WeekdayHistogram,
    pub hour: HourHistogram,
    /// Records with a timestamp (equals each histogram's total)
    pub counted: u64,
    /// Records without a parseable timestamp
    pub skipped: u64,
}

/// Accumulates incidents into weekday and sparse hour counts
#[derive(Debug, Default)]
pub struct TemporalTracker {
    weekday: [u64; DAYS_PER_WEEK],
    /// Sparse hour counts, densified in [`TemporalTracker::finish`]
    hours: BTreeMap<usize, u64>,
    counted: u64,
    skipped: u64,
}

impl TemporalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one incident
    pub fn record(&mut self, record: &IncidentRecord) {
        match record.timestamp {
            Some(ts) => {
                self.weekday[weekday_index(&ts)] += 1;
                *self.hours.entry(ts.hour() as usize).or_default() += 1;
                self.counted += 1;
            }
            None => self.skipped += 1,
        }
    }

    /// Produce the fixed-shape histograms
    pub fn finish(self) -> TemporalSummary {
        debug!(
            counted = self.counted,
            skipped = self.skipped,
            distinct_hours = self.hours.len(),
            "aggregation finished"
        );
        TemporalSummary {
            weekday: WeekdayHistogram {
                counts: self.weekday,
            },
            hour: HourHistogram::from_sparse(&self.hours),
            counted: self.counted,
            skipped: self.skipped,
        }
    }
}

/// Count incidents per weekday (0 = Monday); untimed records are ignored
pub fn aggregate_by_weekday(records: &[IncidentRecord]) -> WeekdayHistogram {
    let mut counts = [0; DAYS_PER_WEEK];
    for index in records.iter().filter_map(IncidentRecord::weekday_index) {
        counts[index] += 1;
    }
    WeekdayHistogram { counts }
}

/// Count incidents per hour of day, zero-filling hours with no incidents
pub fn aggregate_by_hour(records: &[IncidentRecord]) -> HourHistogram {
    let mut sparse: BTreeMap<usize, u64> = BTreeMap::new();
    for hour in records.iter().filter_map(IncidentRecord::hour) {
        *sparse.entry(hour).or_default() += 1;
    }
    HourHistogram::from_sparse(&sparse)
}

/// Compute both histograms and the skipped-record count in one pass
pub fn aggregate(records: &[IncidentRecord]) -> TemporalSummary {
    let mut tracker = TemporalTracker::new();
    for record in records {
        tracker.record(record);
    }
    tracker.finish()
}
