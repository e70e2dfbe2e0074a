// ── Fixed-window normalization ──
//
// The backend flattens every trailing-window aggregate into one object
// with prefixed keys (`last_year_download_avg`, ...). Normalization
// regroups them into per-window buckets and derives percent-bin arrays
// from the histogram count bins.

use serde_json::Value;

use netmeter_api::models::RawFixedBody;

use crate::metrics::METRICS;
use crate::model::{FixedWindowData, WindowSummary};

/// Window prefixes in match-priority order: first match wins, so the
/// longer three/six-month prefixes are listed ahead of the short ones.
static WINDOW_PREFIXES: &[&str] = &[
    "last_three_months_",
    "last_six_months_",
    "last_year_",
    "last_month_",
    "last_week_",
];

/// Test-count fields that may live on `meta` instead of `data`.
static TEST_COUNT_FIELDS: &[&str] = &[
    "last_year_test_count",
    "last_week_test_count",
    "last_month_test_count",
    "last_three_months_test_count",
    "last_six_months_test_count",
];

fn bucket_mut<'a>(data: &'a mut FixedWindowData, prefix: &str) -> &'a mut WindowSummary {
    match prefix {
        "last_three_months_" => &mut data.last_three_months,
        "last_six_months_" => &mut data.last_six_months,
        "last_year_" => &mut data.last_year,
        "last_month_" => &mut data.last_month,
        "last_week_" => &mut data.last_week,
        _ => &mut data.other,
    }
}

/// Normalize a fixed-window body. A body without `data` yields `None`.
pub fn fixed_data(body: RawFixedBody) -> Option<FixedWindowData> {
    let mut data = body.data?;

    // The backend sometimes reports window test counts only on meta;
    // backfill them into data before grouping.
    if let Some(meta) = &body.meta {
        for field in TEST_COUNT_FIELDS {
            let missing = data.get(*field).is_none_or(Value::is_null);
            if missing {
                if let Some(value) = meta.extra.get(*field) {
                    if !value.is_null() {
                        data.insert((*field).to_owned(), value.clone());
                    }
                }
            }
        }
    }

    let mut grouped = FixedWindowData::default();

    for (key, value) in data {
        match WINDOW_PREFIXES.iter().find(|p| key.starts_with(**p)) {
            Some(prefix) => {
                let stripped = key[prefix.len()..].to_owned();
                bucket_mut(&mut grouped, prefix).values.insert(stripped, value);
            }
            None => {
                grouped.other.values.insert(key, value);
            }
        }
    }

    for prefix in WINDOW_PREFIXES {
        add_bin_percents(bucket_mut(&mut grouped, prefix));
    }
    add_bin_percents(&mut grouped.other);

    Some(grouped)
}

/// For every metric carrying histogram bins, derive the percent-bin
/// array: `100 * count[i] / sum(count)`. Empty or all-zero histograms
/// produce no percent array.
fn add_bin_percents(summary: &mut WindowSummary) {
    for metric in &METRICS {
        let (Some(count_key), Some(percent_key)) = (metric.count_bin_key, metric.percent_bin_key)
        else {
            continue;
        };
        let Some(bins) = summary.bins(count_key) else {
            continue;
        };

        let total: f64 = bins.iter().sum();
        if total <= 0.0 {
            continue;
        }

        let percents: Vec<Value> = bins
            .iter()
            .map(|b| Value::from(b / total * 100.0))
            .collect();
        summary
            .values
            .insert(percent_key.to_owned(), Value::Array(percents));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn body(value: serde_json::Value) -> RawFixedBody {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn groups_keys_by_window_prefix() {
        let data = fixed_data(body(json!({ "data": {
            "last_year_download_avg": 10.0,
            "last_week_loss_pct": 2.0,
            "other_field": 5.0
        }})))
        .unwrap();

        assert_eq!(data.last_year.number("download_avg"), Some(10.0));
        assert_eq!(data.last_week.number("loss_pct"), Some(2.0));
        assert_eq!(data.other.number("other_field"), Some(5.0));
        assert!(data.last_month.is_empty());
    }

    #[test]
    fn derives_percent_bins_from_count_bins() {
        let data = fixed_data(body(json!({ "data": {
            "last_year_download_speed_mbps_bins": [1, 1, 2]
        }})))
        .unwrap();

        let percents = data
            .last_year
            .bins("download_speed_mbps_percent_bins")
            .unwrap();
        assert_eq!(percents, vec![25.0, 25.0, 50.0]);
    }

    #[test]
    fn all_zero_bins_produce_no_percent_array() {
        let data = fixed_data(body(json!({ "data": {
            "last_year_download_speed_mbps_bins": [0, 0]
        }})))
        .unwrap();
        assert!(data.last_year.bins("download_speed_mbps_percent_bins").is_none());
    }

    #[test]
    fn backfills_test_counts_from_meta() {
        let data = fixed_data(body(json!({
            "meta": { "last_month_test_count": 1234 },
            "data": { "last_month_download_avg": 8.5 }
        })))
        .unwrap();

        assert_eq!(data.last_month.number("test_count"), Some(1234.0));
    }

    #[test]
    fn data_test_count_wins_over_meta() {
        let data = fixed_data(body(json!({
            "meta": { "last_month_test_count": 1 },
            "data": { "last_month_test_count": 2 }
        })))
        .unwrap();
        assert_eq!(data.last_month.number("test_count"), Some(2.0));
    }

    #[test]
    fn body_without_data_yields_none() {
        assert!(fixed_data(body(json!({ "meta": {} }))).is_none());
    }
}
