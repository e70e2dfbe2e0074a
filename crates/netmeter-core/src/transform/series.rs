// ── Series normalization ──
//
// Decodes wire dates and hours into typed values and computes the
// per-metric extents charts share for axis domains.

use chrono::NaiveDate;
use serde_json::Value;

use netmeter_api::models::{RawPoint, RawSeriesBody};

use crate::metrics::{METRICS, download_metric, upload_metric};
use crate::model::{Extents, TimeSeriesData, TimeSeriesPoint};

const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Normalize a plain time-series body: decode dates, compute extents.
pub fn time_series(body: RawSeriesBody) -> TimeSeriesData {
    normalize(body, false)
}

/// Normalize an hourly body: as [`time_series`], plus a base-10 hour
/// parse. An unparseable hour becomes `None`, not an error -- consumers
/// filter before charting.
pub fn hourly(body: RawSeriesBody) -> TimeSeriesData {
    normalize(body, true)
}

fn normalize(body: RawSeriesBody, with_hour: bool) -> TimeSeriesData {
    let points: Vec<TimeSeriesPoint> = body
        .results
        .into_iter()
        .map(|raw| decode_point(raw, with_hour))
        .collect();
    let extents = compute_extents(&points);
    TimeSeriesData { points, extents }
}

fn decode_point(raw: RawPoint, with_hour: bool) -> TimeSeriesPoint {
    let date = raw
        .date
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s, WIRE_DATE_FORMAT).ok());

    let hour = if with_hour {
        raw.hour.as_ref().and_then(parse_hour)
    } else {
        None
    };

    // Wire nulls and non-numeric values are dropped; extent computation
    // then sees only real samples.
    let values = raw
        .values
        .into_iter()
        .filter_map(|(key, value)| value.as_f64().map(|v| (key, v)))
        .collect();

    TimeSeriesPoint { date, hour, values }
}

fn parse_hour(value: &Value) -> Option<u32> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64().and_then(|h| u32::try_from(h).ok()),
        _ => None,
    }
}

/// Compute the extent of every catalog metric plus the date field and
/// the synthetic combined throughput range.
///
/// Absent values are excluded from min/max, never coerced to 0. The
/// throughput union is the one place missing bounds default to 0, so a
/// series with only download data still yields a usable shared axis.
pub fn compute_extents(points: &[TimeSeriesPoint]) -> Extents {
    let mut extents = Extents::default();

    for metric in &METRICS {
        let mut range: Option<(f64, f64)> = None;
        for value in points.iter().filter_map(|p| p.value(metric.data_key)) {
            range = Some(match range {
                None => (value, value),
                Some((lo, hi)) => (lo.min(value), hi.max(value)),
            });
        }
        if let Some(range) = range {
            extents.metrics.insert(metric.data_key.to_owned(), range);
        }
    }

    for date in points.iter().filter_map(|p| p.date) {
        extents.date = Some(match extents.date {
            None => (date, date),
            Some((lo, hi)) => (lo.min(date), hi.max(date)),
        });
    }

    let download = extents.metric(download_metric().data_key);
    let upload = extents.metric(upload_metric().data_key);
    extents.throughput = (
        download.map_or(0.0, |(lo, _)| lo).min(upload.map_or(0.0, |(lo, _)| lo)),
        download.map_or(0.0, |(_, hi)| hi).max(upload.map_or(0.0, |(_, hi)| hi)),
    );

    extents
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn series_body(results: Value) -> RawSeriesBody {
        serde_json::from_value(json!({ "results": results })).unwrap()
    }

    #[test]
    fn decodes_dates_and_values() {
        let data = time_series(series_body(json!([
            { "date": "2016-01-02", "download_speed_mbps_median": 21.5 }
        ])));

        assert_eq!(
            data.points[0].date,
            NaiveDate::from_ymd_opt(2016, 1, 2)
        );
        assert_eq!(data.points[0].value("download_speed_mbps_median"), Some(21.5));
    }

    #[test]
    fn unparseable_date_becomes_none() {
        let data = time_series(series_body(json!([{ "date": "not-a-date" }])));
        assert_eq!(data.points[0].date, None);
    }

    #[test]
    fn extent_ignores_nulls() {
        let data = time_series(series_body(json!([
            { "date": "2016-01-01", "rtt_avg": 2.0 },
            { "date": "2016-01-02", "rtt_avg": null },
            { "date": "2016-01-03", "rtt_avg": 9.0 }
        ])));

        assert_eq!(data.extents.metric("rtt_avg"), Some((2.0, 9.0)));
        assert_eq!(
            data.extents.date,
            Some((
                NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2016, 1, 3).unwrap()
            ))
        );
    }

    #[test]
    fn throughput_is_union_of_download_and_upload() {
        let data = time_series(series_body(json!([
            { "date": "2016-01-01", "download_speed_mbps_median": 0.0, "upload_speed_mbps_median": 10.0 },
            { "date": "2016-01-02", "download_speed_mbps_median": 50.0, "upload_speed_mbps_median": 30.0 }
        ])));

        assert_eq!(data.extents.metric("download_speed_mbps_median"), Some((0.0, 50.0)));
        assert_eq!(data.extents.metric("upload_speed_mbps_median"), Some((10.0, 30.0)));
        assert_eq!(data.extents.throughput, (0.0, 50.0));
    }

    #[test]
    fn throughput_union_defaults_missing_bounds_to_zero() {
        // Upload absent entirely: its bounds contribute 0 to the union,
        // but no upload extent is fabricated.
        let data = time_series(series_body(json!([
            { "date": "2016-01-01", "download_speed_mbps_median": 20.0 },
            { "date": "2016-01-02", "download_speed_mbps_median": 40.0 }
        ])));

        assert_eq!(data.extents.metric("upload_speed_mbps_median"), None);
        assert_eq!(data.extents.throughput, (0.0, 40.0));
    }

    #[test]
    fn single_point_yields_zero_width_extent() {
        // Degenerate but valid: axis-domain padding is a consumer concern.
        let data = time_series(series_body(json!([
            { "date": "2016-01-01", "rtt_avg": 42.0 }
        ])));
        assert_eq!(data.extents.metric("rtt_avg"), Some((42.0, 42.0)));
    }

    #[test]
    fn hourly_parses_hour_base_10() {
        let data = hourly(series_body(json!([
            { "date": "2016-01-01", "hour": "0" },
            { "date": "2016-01-01", "hour": "23" },
            { "date": "2016-01-01", "hour": 7 },
            { "date": "2016-01-01", "hour": "noon" },
            { "date": "2016-01-01" }
        ])));

        let hours: Vec<Option<u32>> = data.points.iter().map(|p| p.hour).collect();
        assert_eq!(hours, vec![Some(0), Some(23), Some(7), None, None]);
    }

    #[test]
    fn plain_series_never_has_hours() {
        let data = time_series(series_body(json!([
            { "date": "2016-01-01", "hour": "4" }
        ])));
        assert_eq!(data.points[0].hour, None);
    }

    #[test]
    fn missing_results_normalizes_to_empty() {
        let data = time_series(RawSeriesBody::default());
        assert!(data.points.is_empty());
        assert!(data.extents.metrics.is_empty());
        assert_eq!(data.extents.throughput, (0.0, 0.0));
    }

    #[test]
    fn normalization_is_deterministic() {
        let raw = json!({ "results": [
            { "date": "2016-01-01", "download_speed_mbps_median": 10.0, "hour": "3" }
        ]});
        let a = hourly(serde_json::from_value(raw.clone()).unwrap());
        let b = hourly(serde_json::from_value(raw).unwrap());
        assert_eq!(a, b);
    }
}
