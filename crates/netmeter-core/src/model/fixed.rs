// ── Fixed-window summary types ──

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Aggregates for one trailing window, keyed with the window prefix
/// stripped (`download_avg`, `download_speed_mbps_bins`, ...).
///
/// Values stay as raw JSON: the backend mixes scalars and histogram
/// arrays under these keys. Derived percent-bin arrays are inserted next
/// to their count-bin sources during normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    pub values: BTreeMap<String, Value>,
}

impl WindowSummary {
    /// A scalar value by key, if present and numeric.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(Value::as_f64)
    }

    /// A numeric array by key (histogram bins), if present.
    pub fn bins(&self, key: &str) -> Option<Vec<f64>> {
        let array = self.values.get(key)?.as_array()?;
        Some(array.iter().filter_map(Value::as_f64).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Fixed-window summary data regrouped from the backend's flat
/// `last_year_download_avg`-style keys into per-window buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixedWindowData {
    pub last_week: WindowSummary,
    pub last_month: WindowSummary,
    pub last_three_months: WindowSummary,
    pub last_six_months: WindowSummary,
    pub last_year: WindowSummary,
    /// Keys that matched no window prefix, kept under their full name.
    pub other: WindowSummary,
}
