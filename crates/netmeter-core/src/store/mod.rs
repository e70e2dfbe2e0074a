//! Keyed entity cache.
//!
//! Concurrent storage of per-entity fetch state, keyed by entity id (or
//! joined composite key for entity combinations). Reads hand out cloned
//! snapshots -- slot data is `Arc`-wrapped, so clones are cheap.

pub mod entity;
pub mod slot;
pub mod status;

use dashmap::DashMap;

pub use entity::{ClientIspState, CompositeState, LocationState, TimeState, TransitIspState};
pub use slot::FetchSlot;

use crate::model::{
    AsnId, EntityRef, FixedWindowData, LocationId, TimeSeriesData,
};

/// Central cache of entity fetch state.
///
/// One map per entity family. Composite families get separate maps even
/// though their keys embed the component ids: a location+clientISP pair
/// and a location+transitISP pair can produce the same joined string.
pub struct DataStore {
    locations: DashMap<LocationId, LocationState>,
    client_isps: DashMap<AsnId, ClientIspState>,
    transit_isps: DashMap<AsnId, TransitIspState>,
    location_client_isps: DashMap<String, CompositeState>,
    location_transit_isps: DashMap<String, CompositeState>,
    client_isp_transit_isps: DashMap<String, CompositeState>,
    location_client_isp_transit_isps: DashMap<String, CompositeState>,
}

impl DataStore {
    pub fn new() -> Self {
        Self {
            locations: DashMap::new(),
            client_isps: DashMap::new(),
            transit_isps: DashMap::new(),
            location_client_isps: DashMap::new(),
            location_transit_isps: DashMap::new(),
            client_isp_transit_isps: DashMap::new(),
            location_client_isp_transit_isps: DashMap::new(),
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    /// Cloned snapshot of a location's state, if cached.
    pub fn location(&self, id: &LocationId) -> Option<LocationState> {
        self.locations.get(id).map(|r| r.value().clone())
    }

    /// Cloned snapshot of a client ISP's state, if cached.
    pub fn client_isp(&self, id: &AsnId) -> Option<ClientIspState> {
        self.client_isps.get(id).map(|r| r.value().clone())
    }

    /// Cloned snapshot of a transit ISP's state, if cached.
    pub fn transit_isp(&self, id: &AsnId) -> Option<TransitIspState> {
        self.transit_isps.get(id).map(|r| r.value().clone())
    }

    /// Cloned snapshot of a composite entity's state, if cached.
    /// Returns `None` for non-composite refs -- the base families have
    /// their own typed accessors.
    pub fn composite(&self, entity: &EntityRef) -> Option<CompositeState> {
        let map = self.composite_map(entity)?;
        map.get(&entity.cache_key()).map(|r| r.value().clone())
    }

    /// Cloned time-series slot for any entity ref, if cached.
    pub fn time_series_slot(&self, entity: &EntityRef) -> Option<FetchSlot<TimeSeriesData>> {
        self.time_state(entity).map(|t| t.time_series)
    }

    /// Cloned hourly slot for any entity ref, if cached.
    pub fn hourly_slot(&self, entity: &EntityRef) -> Option<FetchSlot<TimeSeriesData>> {
        self.time_state(entity).map(|t| t.hourly)
    }

    /// Cloned fixed-window slot for any entity ref, if cached.
    pub fn fixed_slot(&self, entity: &EntityRef) -> Option<FetchSlot<FixedWindowData>> {
        match entity {
            EntityRef::Location(id) => self.location(id).map(|s| s.fixed),
            EntityRef::ClientIsp(id) => self.client_isp(id).map(|s| s.fixed),
            EntityRef::TransitIsp(id) => self.transit_isp(id).map(|s| s.fixed),
            _ => self.composite(entity).map(|s| s.fixed),
        }
    }

    fn time_state(&self, entity: &EntityRef) -> Option<TimeState> {
        match entity {
            EntityRef::Location(id) => self.location(id).map(|s| s.time),
            EntityRef::ClientIsp(id) => self.client_isp(id).map(|s| s.time),
            EntityRef::TransitIsp(id) => self.transit_isp(id).map(|s| s.time),
            _ => self.composite(entity).map(|s| s.time),
        }
    }

    // ── Mutating accessors (create-if-missing) ───────────────────────
    //
    // The closure runs under the entry's shard lock; callers keep it
    // synchronous and short.

    pub(crate) fn with_location<R>(
        &self,
        id: &LocationId,
        f: impl FnOnce(&mut LocationState) -> R,
    ) -> R {
        let mut entry = self
            .locations
            .entry(id.clone())
            .or_insert_with(|| LocationState::new(id.clone()));
        f(entry.value_mut())
    }

    pub(crate) fn with_client_isp<R>(
        &self,
        id: &AsnId,
        f: impl FnOnce(&mut ClientIspState) -> R,
    ) -> R {
        let mut entry = self
            .client_isps
            .entry(id.clone())
            .or_insert_with(|| ClientIspState::new(id.clone()));
        f(entry.value_mut())
    }

    pub(crate) fn with_transit_isp<R>(
        &self,
        id: &AsnId,
        f: impl FnOnce(&mut TransitIspState) -> R,
    ) -> R {
        let mut entry = self
            .transit_isps
            .entry(id.clone())
            .or_insert_with(|| TransitIspState::new(id.clone()));
        f(entry.value_mut())
    }

    pub(crate) fn with_composite<R>(
        &self,
        entity: &EntityRef,
        f: impl FnOnce(&mut CompositeState) -> R,
    ) -> Option<R> {
        let map = self.composite_map(entity)?;
        let key = entity.cache_key();
        let mut entry = map
            .entry(key.clone())
            .or_insert_with(|| CompositeState::new(key));
        Some(f(entry.value_mut()))
    }

    /// Apply a closure to the time state of any entity ref.
    pub(crate) fn with_time<R>(
        &self,
        entity: &EntityRef,
        f: impl FnOnce(&mut TimeState) -> R,
    ) -> R {
        match entity {
            EntityRef::Location(id) => self.with_location(id, |s| f(&mut s.time)),
            EntityRef::ClientIsp(id) => self.with_client_isp(id, |s| f(&mut s.time)),
            EntityRef::TransitIsp(id) => self.with_transit_isp(id, |s| f(&mut s.time)),
            composite => self
                .with_composite(composite, |s| f(&mut s.time))
                .unwrap_or_else(|| unreachable!("composite ref routed to composite map")),
        }
    }

    /// Apply a closure to the fixed-window slot of any entity ref.
    pub(crate) fn with_fixed<R>(
        &self,
        entity: &EntityRef,
        f: impl FnOnce(&mut FetchSlot<FixedWindowData>) -> R,
    ) -> R {
        match entity {
            EntityRef::Location(id) => self.with_location(id, |s| f(&mut s.fixed)),
            EntityRef::ClientIsp(id) => self.with_client_isp(id, |s| f(&mut s.fixed)),
            EntityRef::TransitIsp(id) => self.with_transit_isp(id, |s| f(&mut s.fixed)),
            composite => self
                .with_composite(composite, |s| f(&mut s.fixed))
                .unwrap_or_else(|| unreachable!("composite ref routed to composite map")),
        }
    }

    fn composite_map(&self, entity: &EntityRef) -> Option<&DashMap<String, CompositeState>> {
        match entity {
            EntityRef::LocationClientIsp(..) => Some(&self.location_client_isps),
            EntityRef::LocationTransitIsp(..) => Some(&self.location_transit_isps),
            EntityRef::ClientIspTransitIsp(..) => Some(&self.client_isp_transit_isps),
            EntityRef::LocationClientIspTransitIsp(..) => {
                Some(&self.location_client_isp_transit_isps)
            }
            _ => None,
        }
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}
