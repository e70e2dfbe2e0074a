// Measurement API response types
//
// Wire models for the backend's JSON API. The backend is loosely typed and
// inconsistent about field presence across endpoint families, so fields use
// `#[serde(default)]` liberally and unknown fields land in `extra` maps.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Accept a string or a bare number for fields the backend is inconsistent
/// about (ASN numbers in particular).
fn de_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// ── Entity metadata ──────────────────────────────────────────────────

/// Raw entity metadata shared by all three entity kinds.
///
/// Locations populate the `client_*` geo fields; client ISPs populate
/// `client_asn_*`; transit ISPs populate `server_asn_*`. Everything the
/// backend sends beyond the modeled fields is kept in `extra` (fixed-window
/// test counts, for example, arrive prefixed and are read from there).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMeta {
    // Location geo fields
    #[serde(default)]
    pub client_city: Option<String>,
    #[serde(default)]
    pub client_region: Option<String>,
    #[serde(default)]
    pub client_country: Option<String>,
    #[serde(default)]
    pub client_continent: Option<String>,
    #[serde(default)]
    pub client_region_code: Option<String>,
    #[serde(default)]
    pub client_country_code: Option<String>,
    #[serde(default)]
    pub client_continent_code: Option<String>,

    // Location keys
    #[serde(default)]
    pub location_key: Option<String>,
    #[serde(default)]
    pub client_location_key: Option<String>,
    #[serde(default)]
    pub parent_location_key: Option<String>,

    // ISP fields
    #[serde(default)]
    pub client_asn_name: Option<String>,
    #[serde(default, deserialize_with = "de_string_or_number")]
    pub client_asn_number: Option<String>,
    #[serde(default)]
    pub server_asn_name: Option<String>,
    #[serde(default, deserialize_with = "de_string_or_number")]
    pub server_asn_number: Option<String>,

    // Geo coordinates
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,

    /// Location granularity: `"city"`, `"region"`, `"country"`, `"continent"`.
    #[serde(default, rename = "type")]
    pub meta_type: Option<String>,

    #[serde(default)]
    pub test_count: Option<i64>,

    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ── Response bodies ──────────────────────────────────────────────────

/// Info endpoint body: `{ meta: {...} }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInfoBody {
    #[serde(default)]
    pub meta: Option<RawMeta>,
}

/// One point of a (possibly hourly) series.
///
/// Metric values arrive keyed by their data key (`download_speed_mbps_median`
/// and friends) and may be JSON `null`; they are kept raw here and coerced
/// during normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPoint {
    #[serde(default)]
    pub date: Option<String>,
    /// Hour of day, `"0"`..`"23"`. Some backends send it as a bare number.
    #[serde(default)]
    pub hour: Option<Value>,
    #[serde(flatten)]
    pub values: serde_json::Map<String, Value>,
}

/// Series endpoint body: `{ meta?, results: [...] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSeriesBody {
    #[serde(default)]
    pub meta: Option<RawMeta>,
    #[serde(default)]
    pub results: Vec<RawPoint>,
}

/// Fixed-window summary body: `{ meta?, data: { last_year_download_avg, ... } }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFixedBody {
    #[serde(default)]
    pub meta: Option<RawMeta>,
    #[serde(default)]
    pub data: Option<serde_json::Map<String, Value>>,
}

/// One entry of a search or top-N listing: `{ meta, data }`.
///
/// Search entries usually omit `data`; top-N entries carry aggregates in it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListEntry {
    #[serde(default)]
    pub meta: RawMeta,
    #[serde(default)]
    pub data: serde_json::Map<String, Value>,
}

/// Search / top-N listing body: `{ results: [ { meta, data }, ... ] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListBody {
    #[serde(default)]
    pub results: Option<Vec<RawListEntry>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn meta_tolerates_missing_fields() {
        let meta: RawMeta = serde_json::from_value(json!({})).unwrap();
        assert!(meta.client_city.is_none());
        assert!(meta.extra.is_empty());
    }

    #[test]
    fn meta_captures_unknown_fields_in_extra() {
        let meta: RawMeta = serde_json::from_value(json!({
            "client_city": "Seattle",
            "last_year_test_count": 123
        }))
        .unwrap();
        assert_eq!(meta.client_city.as_deref(), Some("Seattle"));
        assert_eq!(meta.extra["last_year_test_count"], json!(123));
    }

    #[test]
    fn asn_number_accepts_string_or_number() {
        let meta: RawMeta =
            serde_json::from_value(json!({ "client_asn_number": "AS7922" })).unwrap();
        assert_eq!(meta.client_asn_number.as_deref(), Some("AS7922"));

        let meta: RawMeta = serde_json::from_value(json!({ "client_asn_number": 7922 })).unwrap();
        assert_eq!(meta.client_asn_number.as_deref(), Some("7922"));
    }

    #[test]
    fn point_flattens_metric_values() {
        let point: RawPoint = serde_json::from_value(json!({
            "date": "2016-01-02",
            "hour": "14",
            "download_speed_mbps_median": 21.5,
            "rtt_avg": null
        }))
        .unwrap();
        assert_eq!(point.date.as_deref(), Some("2016-01-02"));
        assert_eq!(point.values["download_speed_mbps_median"], json!(21.5));
        assert!(point.values["rtt_avg"].is_null());
    }

    #[test]
    fn list_body_distinguishes_absent_results() {
        let body: RawListBody = serde_json::from_value(json!({})).unwrap();
        assert!(body.results.is_none());

        let body: RawListBody = serde_json::from_value(json!({ "results": [] })).unwrap();
        assert_eq!(body.results.unwrap().len(), 0);
    }
}
