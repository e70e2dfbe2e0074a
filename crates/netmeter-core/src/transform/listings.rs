// ── Search & top-N listing normalization ──
//
// Listing entries arrive as `{ meta, data }` pairs; normalization
// flattens them to enriched metadata, pulling aggregate test counts up
// from `data` when meta lacks them.

use serde_json::Value;

use netmeter_api::models::{RawListBody, RawListEntry};

use super::isp::{client_isp_meta, transit_isp_meta};
use super::location::location_meta;
use crate::model::{ClientIspMeta, LocationMeta, TransitIspMeta};

fn entries(body: RawListBody) -> Vec<RawListEntry> {
    // Absent `results` degrades to an empty listing.
    body.results.unwrap_or_default()
}

fn data_test_count(data: &serde_json::Map<String, Value>) -> i64 {
    data.get("test_count").and_then(Value::as_i64).unwrap_or(0)
}

/// Normalize a location search listing.
pub fn location_search_results(body: RawListBody) -> Vec<LocationMeta> {
    entries(body)
        .into_iter()
        .map(|entry| location_meta(entry.meta))
        .collect()
}

/// Normalize a client-ISP search listing.
pub fn client_isp_search_results(body: RawListBody) -> Vec<ClientIspMeta> {
    entries(body)
        .into_iter()
        .map(|entry| client_isp_meta(entry.meta))
        .collect()
}

/// Normalize a transit-ISP search listing.
pub fn transit_isp_search_results(body: RawListBody) -> Vec<TransitIspMeta> {
    entries(body)
        .into_iter()
        .map(|entry| transit_isp_meta(entry.meta))
        .collect()
}

/// Normalize a top-client-ISPs listing: flatten each entry to its meta,
/// falling back to `data.test_count` when meta carries no count.
pub fn top_client_isps(body: RawListBody) -> Vec<ClientIspMeta> {
    entries(body)
        .into_iter()
        .map(|entry| {
            let mut meta = client_isp_meta(entry.meta);
            if meta.test_count == 0 {
                meta.test_count = data_test_count(&entry.data);
            }
            meta
        })
        .collect()
}

/// Normalize a top-transit-ISPs listing.
pub fn top_transit_isps(body: RawListBody) -> Vec<TransitIspMeta> {
    entries(body)
        .into_iter()
        .map(|entry| {
            let mut meta = transit_isp_meta(entry.meta);
            if meta.test_count == 0 {
                meta.test_count = data_test_count(&entry.data);
            }
            meta
        })
        .collect()
}

/// Normalize a top-locations listing.
///
/// The backend pre-sorts by test count; re-sorting by granularity
/// (cities, then regions, countries, continents) is stable, so the
/// count ordering is preserved within each group.
pub fn top_locations(body: RawListBody) -> Vec<LocationMeta> {
    let mut results: Vec<LocationMeta> = entries(body)
        .into_iter()
        .map(|entry| {
            let mut meta = location_meta(entry.meta);
            if meta.test_count == 0 {
                meta.test_count = data_test_count(&entry.data);
            }
            meta
        })
        .collect();

    results.sort_by_key(|meta| meta.location_type.sort_priority());
    results
}
