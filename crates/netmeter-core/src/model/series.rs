// ── Time series domain types ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One normalized point of a time series.
///
/// `date` and `hour` are `None` when the wire value was missing or
/// unparseable -- that is not an error, but consumers must filter such
/// points before charting. Metric values are keyed by the catalog's
/// `data_key`; wire nulls are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: Option<NaiveDate>,
    /// Hour of day (0-23). Only present on hourly-aggregated series.
    pub hour: Option<u32>,
    pub values: BTreeMap<String, f64>,
}

impl TimeSeriesPoint {
    /// The value of a metric on this point, if present.
    pub fn value(&self, data_key: &str) -> Option<f64> {
        self.values.get(data_key).copied()
    }
}

/// `[min, max]` ranges computed over a point sequence.
///
/// Per-metric extents exclude absent values entirely. The synthetic
/// `throughput` extent is the union of the download and upload bounds,
/// with a missing bound treated as 0 only in the union computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    pub date: Option<(NaiveDate, NaiveDate)>,
    pub metrics: BTreeMap<String, (f64, f64)>,
    pub throughput: (f64, f64),
}

impl Extents {
    /// The extent of a metric by its data key, if any value was seen.
    pub fn metric(&self, data_key: &str) -> Option<(f64, f64)> {
        self.metrics.get(data_key).copied()
    }
}

/// A normalized (possibly hourly) series with its precomputed extents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesData {
    pub points: Vec<TimeSeriesPoint>,
    pub extents: Extents,
}
