// ── Metric and facet-type catalogs ──
//
// Static descriptors for the measurable quantities and the grouping
// dimensions the dashboard can view. Both catalogs are ordered; the
// first entry is the documented default for unknown lookup values.

/// Static descriptor for one measurable quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metric {
    /// Stable identifier used in URLs and lookups.
    pub value: &'static str,
    /// Human-readable name.
    pub label: &'static str,
    /// Display unit.
    pub unit: &'static str,
    /// Key of this metric's value on series points and extents.
    pub data_key: &'static str,
    /// Key of the histogram count-bin array in fixed-window data, if any.
    pub count_bin_key: Option<&'static str>,
    /// Key the derived percent-bin array is stored under, if any.
    pub percent_bin_key: Option<&'static str>,
    /// Decimal places to render values with.
    pub decimals: u8,
}

/// The fixed, ordered metric catalog. Immutable for the process lifetime.
pub static METRICS: [Metric; 4] = [
    Metric {
        value: "download",
        label: "Download Speed",
        unit: "Mbps",
        data_key: "download_speed_mbps_median",
        count_bin_key: Some("download_speed_mbps_bins"),
        percent_bin_key: Some("download_speed_mbps_percent_bins"),
        decimals: 1,
    },
    Metric {
        value: "upload",
        label: "Upload Speed",
        unit: "Mbps",
        data_key: "upload_speed_mbps_median",
        count_bin_key: Some("upload_speed_mbps_bins"),
        percent_bin_key: Some("upload_speed_mbps_percent_bins"),
        decimals: 1,
    },
    Metric {
        value: "latency",
        label: "Round-trip Time",
        unit: "ms",
        data_key: "rtt_avg",
        count_bin_key: None,
        percent_bin_key: None,
        decimals: 0,
    },
    Metric {
        value: "loss",
        label: "Packet Loss",
        unit: "%",
        data_key: "packet_retransmit_rate",
        count_bin_key: None,
        percent_bin_key: None,
        decimals: 2,
    },
];

/// Extent key for the synthetic combined download+upload range.
pub const THROUGHPUT_KEY: &str = "throughput";

/// Look up a metric by its `value`, falling back to the first catalog
/// entry. The second element reports whether the fallback was used so
/// callers can log the bad input.
pub fn metric_by_value(value: &str) -> (&'static Metric, bool) {
    match METRICS.iter().find(|m| m.value == value) {
        Some(metric) => (metric, false),
        None => (&METRICS[0], true),
    }
}

/// The download metric. Always present in the catalog.
pub fn download_metric() -> &'static Metric {
    &METRICS[0]
}

/// The upload metric. Always present in the catalog.
pub fn upload_metric() -> &'static Metric {
    &METRICS[1]
}

// ── Facet types ──────────────────────────────────────────────────────

/// A grouping dimension for comparison views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetType {
    pub value: &'static str,
    pub label: &'static str,
}

/// The fixed, ordered facet-type catalog.
pub static FACET_TYPES: [FacetType; 3] = [
    FacetType {
        value: "location",
        label: "Location",
    },
    FacetType {
        value: "clientIsp",
        label: "Client ISP",
    },
    FacetType {
        value: "transitIsp",
        label: "Transit ISP",
    },
];

/// Look up a facet type by its `value`, falling back to the first entry.
pub fn facet_type_by_value(value: &str) -> (&'static FacetType, bool) {
    match FACET_TYPES.iter().find(|f| f.value == value) {
        Some(facet) => (facet, false),
        None => (&FACET_TYPES[0], true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_metric_resolves_without_fallback() {
        let (metric, used_default) = metric_by_value("latency");
        assert_eq!(metric.data_key, "rtt_avg");
        assert!(!used_default);
    }

    #[test]
    fn unknown_metric_falls_back_to_download() {
        let (metric, used_default) = metric_by_value("jitter");
        assert_eq!(metric.value, "download");
        assert!(used_default);
    }

    #[test]
    fn unknown_facet_falls_back_to_location() {
        let (facet, used_default) = facet_type_by_value("satellite");
        assert_eq!(facet.value, "location");
        assert!(used_default);
    }

    #[test]
    fn bin_keys_only_on_throughput_metrics() {
        assert!(METRICS[0].count_bin_key.is_some());
        assert!(METRICS[1].count_bin_key.is_some());
        assert!(METRICS[2].count_bin_key.is_none());
        assert!(METRICS[3].count_bin_key.is_none());
    }
}
