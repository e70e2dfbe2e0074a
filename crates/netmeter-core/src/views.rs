// ── Composite views over the store ──
//
// Selector-style projections a compare dashboard reads: inflate id lists
// into cached values and merge per-slot statuses into one aggregate.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::warn;

use crate::metrics::{FacetType, Metric, facet_type_by_value, metric_by_value};
use crate::model::{
    AsnId, ClientIspMeta, EntityRef, LocationId, LocationMeta, TimeSeriesData, TransitIspMeta,
};
use crate::store::status::{Status, merge_statuses};
use crate::store::{DataStore, FetchSlot};

/// Resolve a metric from a view parameter, logging when the value is
/// unknown and the catalog default is substituted.
pub fn view_metric(value: &str) -> &'static Metric {
    let (metric, used_default) = metric_by_value(value);
    if used_default {
        warn!(value, default = metric.value, "metric not found, using default");
    }
    metric
}

/// Resolve a facet type from a view parameter, logging on fallback.
pub fn view_facet_type(value: &str) -> &'static FacetType {
    let (facet, used_default) = facet_type_by_value(value);
    if used_default {
        warn!(value, default = facet.value, "facet type not found, using default");
    }
    facet
}

// ── Info projections ─────────────────────────────────────────────────

/// Info for each facet location that has it cached. Absent or unfetched
/// entries are skipped.
pub fn facet_location_infos(store: &DataStore, ids: &[LocationId]) -> Vec<Arc<LocationMeta>> {
    ids.iter()
        .filter_map(|id| store.location(id))
        .filter_map(|state| state.info.data)
        .collect()
}

/// Info for each filter client ISP that has it cached.
pub fn filter_client_isp_infos(store: &DataStore, ids: &[AsnId]) -> Vec<Arc<ClientIspMeta>> {
    ids.iter()
        .filter_map(|id| store.client_isp(id))
        .filter_map(|state| state.info.data)
        .collect()
}

/// Info for each filter transit ISP that has it cached.
pub fn filter_transit_isp_infos(store: &DataStore, ids: &[AsnId]) -> Vec<Arc<TransitIspMeta>> {
    ids.iter()
        .filter_map(|id| store.transit_isp(id))
        .filter_map(|state| state.info.data)
        .collect()
}

// ── Series projections ───────────────────────────────────────────────

/// The overall (per-facet-location) time series plus the merged status
/// across the underlying slots.
pub fn overall_time_series(
    store: &DataStore,
    ids: &[LocationId],
) -> (Vec<Arc<TimeSeriesData>>, Status) {
    let slots: Vec<FetchSlot<TimeSeriesData>> = ids
        .iter()
        .filter_map(|id| store.location(id))
        .map(|state| state.time.time_series)
        .collect();

    let status = merge_statuses(slots.iter().map(FetchSlot::status));
    let series = slots.into_iter().filter_map(|slot| slot.data).collect();
    (series, status)
}

/// Series and merged status for one location's filter group.
#[derive(Debug, Clone)]
pub struct FilterGroup {
    pub series: Vec<Arc<TimeSeriesData>>,
    pub status: Status,
}

/// Per-location grouping of location x client-ISP series: for each facet
/// location present in the store, the series of its cached combinations
/// with the filter client ISPs, plus a merged per-group status.
pub fn filtered_time_series(
    store: &DataStore,
    locations: &[LocationId],
    client_isps: &[AsnId],
) -> BTreeMap<LocationId, FilterGroup> {
    let mut by_location = BTreeMap::new();

    for location in locations {
        if store.location(location).is_none() {
            continue;
        }

        let slots: Vec<FetchSlot<TimeSeriesData>> = client_isps
            .iter()
            .filter_map(|isp| {
                store.time_series_slot(&EntityRef::LocationClientIsp(
                    location.clone(),
                    isp.clone(),
                ))
            })
            .collect();

        let status = merge_statuses(slots.iter().map(FetchSlot::status));
        let series = slots.into_iter().filter_map(|slot| slot.data).collect();

        by_location.insert(location.clone(), FilterGroup { series, status });
    }

    by_location
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::TimeSeriesData;

    fn seeded_store() -> DataStore {
        let store = DataStore::new();
        let ready = LocationId::from("ready");
        let loading = LocationId::from("loading");

        store.with_location(&ready, |s| {
            s.time.time_series.try_begin(None);
            s.time.time_series.settle_ok(Some(TimeSeriesData::default()));
        });
        store.with_location(&loading, |s| {
            s.time.time_series.try_begin(None);
        });
        store
    }

    #[test]
    fn overall_series_merges_to_partially_loaded() {
        let store = seeded_store();
        let (series, status) = overall_time_series(
            &store,
            &[LocationId::from("ready"), LocationId::from("loading")],
        );

        assert_eq!(series.len(), 1);
        assert_eq!(status, Status::PartiallyLoaded);
    }

    #[test]
    fn missing_locations_are_skipped() {
        let store = seeded_store();
        let (series, status) =
            overall_time_series(&store, &[LocationId::from("nowhere")]);
        assert!(series.is_empty());
        assert_eq!(status, Status::Unknown);
    }

    #[test]
    fn filtered_series_groups_by_location() {
        let store = seeded_store();
        let location = LocationId::from("ready");
        let isp = AsnId::from("AS1");

        store.with_time(
            &EntityRef::LocationClientIsp(location.clone(), isp.clone()),
            |t| {
                t.time_series.try_begin(None);
                t.time_series.settle_ok(Some(TimeSeriesData::default()));
            },
        );

        let groups = filtered_time_series(&store, &[location.clone()], &[isp]);
        let group = groups.get(&location).unwrap();
        assert_eq!(group.status, Status::Ready);
        assert_eq!(group.series.len(), 1);
    }

    #[test]
    fn unknown_metric_falls_back_with_default() {
        assert_eq!(view_metric("jitter").value, "download");
        assert_eq!(view_facet_type("bogus").value, "location");
    }
}
