// ── Fetch coordination ──
//
// Decides per (entity, sub-resource, aggregation) key whether a network
// fetch is needed, marks the slot before the first await point, and
// settles it with normalized data or an error. Failure is represented as
// slot state, never raised to callers -- only the uncached listing
// passthroughs return errors directly.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, trace, warn};

use netmeter_api::client::EntityKind;
use netmeter_api::{ApiClient, DateRange, TimeAggregation};

use crate::error::CoreError;
use crate::model::{AsnId, ClientIspMeta, EntityRef, LocationId, LocationMeta, TransitIspMeta};
use crate::store::DataStore;
use crate::transform;

/// Coordinates fetches against the measurement API and settles results
/// into the [`DataStore`].
///
/// Settlements apply in completion order: when an aggregation change
/// re-opens a slot while an older fetch is still in flight, whichever
/// response settles last owns the slot (last-settled-wins, a deliberate
/// carry-over -- see DESIGN.md).
pub struct FetchCoordinator {
    client: Arc<ApiClient>,
    store: Arc<DataStore>,
}

impl FetchCoordinator {
    /// Create a coordinator with a fresh, empty store.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: Arc::new(client),
            store: Arc::new(DataStore::new()),
        }
    }

    /// Create a coordinator over an existing store.
    pub fn with_store(client: Arc<ApiClient>, store: Arc<DataStore>) -> Self {
        Self { client, store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<DataStore> {
        &self.store
    }

    // ── Info ─────────────────────────────────────────────────────────

    /// Fetch an entity's info unless it is already cached or in flight.
    pub async fn fetch_info_if_needed(&self, entity: &EntityRef) {
        let needed = match entity {
            EntityRef::Location(id) => self.store.with_location(id, |s| s.info.try_begin(None)),
            EntityRef::ClientIsp(id) => self.store.with_client_isp(id, |s| s.info.try_begin(None)),
            EntityRef::TransitIsp(id) => {
                self.store.with_transit_isp(id, |s| s.info.try_begin(None))
            }
            composite => self
                .store
                .with_composite(composite, |s| s.info.try_begin(None))
                .unwrap_or(false),
        };
        if !needed {
            trace!(entity = %entity, "info cached, skipping fetch");
            return;
        }

        debug!(entity = %entity, "fetching info");
        let result = self.client.info(&entity.to_path()).await;

        match (entity, result) {
            (EntityRef::Location(id), Ok(raw)) => {
                let meta = transform::location_info(raw);
                self.store.with_location(id, |s| s.info.settle_ok(meta));
            }
            (EntityRef::ClientIsp(id), Ok(raw)) => {
                let meta = transform::client_isp_info(raw);
                self.store.with_client_isp(id, |s| s.info.settle_ok(meta));
            }
            (EntityRef::TransitIsp(id), Ok(raw)) => {
                let meta = transform::transit_isp_info(raw);
                self.store.with_transit_isp(id, |s| s.info.settle_ok(meta));
            }
            (composite, Ok(raw)) => {
                let meta = transform::composite_info(raw);
                let _ = self
                    .store
                    .with_composite(composite, |s| s.info.settle_ok(meta));
            }
            (entity, Err(err)) => {
                warn!(entity = %entity, error = %err, "info fetch failed");
                let message = err.to_string();
                match entity {
                    EntityRef::Location(id) => {
                        self.store.with_location(id, |s| s.info.settle_err(message));
                    }
                    EntityRef::ClientIsp(id) => {
                        self.store.with_client_isp(id, |s| s.info.settle_err(message));
                    }
                    EntityRef::TransitIsp(id) => {
                        self.store
                            .with_transit_isp(id, |s| s.info.settle_err(message));
                    }
                    composite => {
                        let _ = self
                            .store
                            .with_composite(composite, |s| s.info.settle_err(message));
                    }
                }
            }
        }
    }

    // ── Series ───────────────────────────────────────────────────────

    /// Fetch an entity's time series at the given aggregation unless the
    /// slot already holds (or is fetching) that aggregation.
    pub async fn fetch_time_series_if_needed(
        &self,
        aggregation: TimeAggregation,
        entity: &EntityRef,
        range: DateRange,
    ) {
        let needed = self
            .store
            .with_time(entity, |t| t.time_series.try_begin(Some(aggregation)));
        if !needed {
            trace!(entity = %entity, "time series cached, skipping fetch");
            return;
        }

        debug!(entity = %entity, aggregation = %aggregation, "fetching time series");
        match self
            .client
            .time_series(aggregation, &entity.to_path(), range)
            .await
        {
            Ok(raw) => {
                let data = transform::time_series(raw);
                self.store
                    .with_time(entity, |t| t.time_series.settle_ok(Some(data)));
            }
            Err(err) => {
                warn!(entity = %entity, error = %err, "time series fetch failed");
                self.store
                    .with_time(entity, |t| t.time_series.settle_err(err.to_string()));
            }
        }
    }

    /// Fetch an entity's hour-of-day series at the given aggregation.
    pub async fn fetch_hourly_if_needed(
        &self,
        aggregation: TimeAggregation,
        entity: &EntityRef,
        range: DateRange,
    ) {
        let needed = self
            .store
            .with_time(entity, |t| t.hourly.try_begin(Some(aggregation)));
        if !needed {
            trace!(entity = %entity, "hourly cached, skipping fetch");
            return;
        }

        debug!(entity = %entity, aggregation = %aggregation, "fetching hourly");
        match self
            .client
            .hourly(aggregation, &entity.to_path(), range)
            .await
        {
            Ok(raw) => {
                let data = transform::hourly(raw);
                self.store
                    .with_time(entity, |t| t.hourly.settle_ok(Some(data)));
            }
            Err(err) => {
                warn!(entity = %entity, error = %err, "hourly fetch failed");
                self.store
                    .with_time(entity, |t| t.hourly.settle_err(err.to_string()));
            }
        }
    }

    // ── Fixed windows ────────────────────────────────────────────────

    /// Fetch an entity's fixed-window summary unless cached or in flight.
    pub async fn fetch_fixed_if_needed(&self, entity: &EntityRef) {
        let needed = self.store.with_fixed(entity, |slot| slot.try_begin(None));
        if !needed {
            trace!(entity = %entity, "fixed data cached, skipping fetch");
            return;
        }

        debug!(entity = %entity, "fetching fixed data");
        match self.client.fixed(&entity.to_path()).await {
            Ok(raw) => {
                let data = transform::fixed_data(raw);
                self.store.with_fixed(entity, |slot| slot.settle_ok(data));
            }
            Err(err) => {
                warn!(entity = %entity, error = %err, "fixed data fetch failed");
                self.store
                    .with_fixed(entity, |slot| slot.settle_err(err.to_string()));
            }
        }
    }

    // ── Location client ISPs ─────────────────────────────────────────

    /// Fetch the top client ISPs serving a location unless cached.
    pub async fn fetch_location_client_isps_if_needed(&self, id: &LocationId) {
        let needed = self
            .store
            .with_location(id, |s| s.client_isps.try_begin(None));
        if !needed {
            trace!(location = %id, "client ISP list cached, skipping fetch");
            return;
        }

        debug!(location = %id, "fetching client ISPs");
        match self.client.location_client_isps(id.as_str()).await {
            Ok(raw) => {
                let isps = transform::top_client_isps(raw);
                self.store
                    .with_location(id, |s| s.client_isps.settle_ok(Some(isps)));
            }
            Err(err) => {
                warn!(location = %id, error = %err, "client ISP list fetch failed");
                self.store
                    .with_location(id, |s| s.client_isps.settle_err(err.to_string()));
            }
        }
    }

    // ── Fan-out ──────────────────────────────────────────────────────

    /// Fetch the time series for every facet/filter combination: each
    /// location, each location x client ISP, each location x transit
    /// ISP, and each full triple. Every combination is independently
    /// subject to the needs-fetch check; composite status over the
    /// results comes from [`crate::views`].
    pub async fn fetch_compare_time_series(
        &self,
        aggregation: TimeAggregation,
        locations: &[LocationId],
        client_isps: &[AsnId],
        transit_isps: &[AsnId],
        range: DateRange,
    ) {
        let combos = compare_entity_refs(locations, client_isps, transit_isps);
        debug!(
            combinations = combos.len(),
            aggregation = %aggregation,
            "fetching compare series"
        );
        join_all(
            combos
                .iter()
                .map(|entity| self.fetch_time_series_if_needed(aggregation, entity, range)),
        )
        .await;
    }

    // ── Search & top-N passthroughs (uncached) ───────────────────────

    /// Search locations by name prefix.
    pub async fn search_locations(&self, query: &str) -> Result<Vec<LocationMeta>, CoreError> {
        let raw = self.client.search(EntityKind::Location, query).await?;
        Ok(transform::location_search_results(raw))
    }

    /// Search client ISPs by name.
    pub async fn search_client_isps(&self, query: &str) -> Result<Vec<ClientIspMeta>, CoreError> {
        let raw = self.client.search(EntityKind::ClientIsp, query).await?;
        Ok(transform::client_isp_search_results(raw))
    }

    /// Search transit ISPs by name.
    pub async fn search_transit_isps(&self, query: &str) -> Result<Vec<TransitIspMeta>, CoreError> {
        let raw = self.client.search(EntityKind::TransitIsp, query).await?;
        Ok(transform::transit_isp_search_results(raw))
    }

    /// Top locations, optionally narrowed to those served by the given
    /// client ISPs.
    pub async fn top_locations(
        &self,
        client_isp_ids: &[AsnId],
    ) -> Result<Vec<LocationMeta>, CoreError> {
        let ids: Vec<String> = client_isp_ids.iter().map(ToString::to_string).collect();
        let filter = (!ids.is_empty()).then_some((EntityKind::ClientIsp, ids.as_slice()));
        let raw = self.client.top(EntityKind::Location, filter).await?;
        Ok(transform::top_locations(raw))
    }

    /// Top client ISPs, optionally narrowed to the given locations.
    pub async fn top_client_isps(
        &self,
        location_ids: &[LocationId],
    ) -> Result<Vec<ClientIspMeta>, CoreError> {
        let ids: Vec<String> = location_ids.iter().map(ToString::to_string).collect();
        let filter = (!ids.is_empty()).then_some((EntityKind::Location, ids.as_slice()));
        let raw = self.client.top(EntityKind::ClientIsp, filter).await?;
        Ok(transform::top_client_isps(raw))
    }

    /// Top transit ISPs, optionally narrowed to the given locations.
    pub async fn top_transit_isps(
        &self,
        location_ids: &[LocationId],
    ) -> Result<Vec<TransitIspMeta>, CoreError> {
        let ids: Vec<String> = location_ids.iter().map(ToString::to_string).collect();
        let filter = (!ids.is_empty()).then_some((EntityKind::Location, ids.as_slice()));
        let raw = self.client.top(EntityKind::TransitIsp, filter).await?;
        Ok(transform::top_transit_isps(raw))
    }
}

/// Every entity combination a compare view needs: facet locations plus
/// their cross products with the filter ISP lists.
fn compare_entity_refs(
    locations: &[LocationId],
    client_isps: &[AsnId],
    transit_isps: &[AsnId],
) -> Vec<EntityRef> {
    let mut refs = Vec::new();

    for location in locations {
        refs.push(EntityRef::Location(location.clone()));

        for client_isp in client_isps {
            refs.push(EntityRef::LocationClientIsp(
                location.clone(),
                client_isp.clone(),
            ));
        }
        for transit_isp in transit_isps {
            refs.push(EntityRef::LocationTransitIsp(
                location.clone(),
                transit_isp.clone(),
            ));
        }
        for client_isp in client_isps {
            for transit_isp in transit_isps {
                refs.push(EntityRef::LocationClientIspTransitIsp(
                    location.clone(),
                    client_isp.clone(),
                    transit_isp.clone(),
                ));
            }
        }
    }

    refs
}
