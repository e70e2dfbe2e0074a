// ── Per-entity cached state ──
//
// One state struct per entity family; each holds a FetchSlot per
// sub-resource. Cloning is cheap: slot data is Arc-wrapped.

use super::slot::FetchSlot;
use crate::model::{
    AsnId, ClientIspMeta, CompositeMeta, FixedWindowData, LocationId, LocationMeta,
    TimeSeriesData, TransitIspMeta,
};

/// The two series sub-resources every entity carries.
#[derive(Debug, Clone, Default)]
pub struct TimeState {
    pub time_series: FetchSlot<TimeSeriesData>,
    pub hourly: FetchSlot<TimeSeriesData>,
}

/// Cached state for one location.
#[derive(Debug, Clone)]
pub struct LocationState {
    pub id: LocationId,
    pub info: FetchSlot<LocationMeta>,
    pub time: TimeState,
    pub fixed: FetchSlot<FixedWindowData>,
    /// Top client ISPs serving this location.
    pub client_isps: FetchSlot<Vec<ClientIspMeta>>,
}

impl LocationState {
    pub(crate) fn new(id: LocationId) -> Self {
        Self {
            id,
            info: FetchSlot::default(),
            time: TimeState::default(),
            fixed: FetchSlot::default(),
            client_isps: FetchSlot::default(),
        }
    }
}

/// Cached state for one client ISP.
#[derive(Debug, Clone)]
pub struct ClientIspState {
    pub id: AsnId,
    pub info: FetchSlot<ClientIspMeta>,
    pub time: TimeState,
    pub fixed: FetchSlot<FixedWindowData>,
}

impl ClientIspState {
    pub(crate) fn new(id: AsnId) -> Self {
        Self {
            id,
            info: FetchSlot::default(),
            time: TimeState::default(),
            fixed: FetchSlot::default(),
        }
    }
}

/// Cached state for one transit ISP.
#[derive(Debug, Clone)]
pub struct TransitIspState {
    pub id: AsnId,
    pub info: FetchSlot<TransitIspMeta>,
    pub time: TimeState,
    pub fixed: FetchSlot<FixedWindowData>,
}

impl TransitIspState {
    pub(crate) fn new(id: AsnId) -> Self {
        Self {
            id,
            info: FetchSlot::default(),
            time: TimeState::default(),
            fixed: FetchSlot::default(),
        }
    }
}

/// Cached state for a composite entity (location x client ISP, etc.),
/// keyed by the joined composite cache key.
#[derive(Debug, Clone)]
pub struct CompositeState {
    pub id: String,
    pub info: FetchSlot<CompositeMeta>,
    pub time: TimeState,
    pub fixed: FetchSlot<FixedWindowData>,
}

impl CompositeState {
    pub(crate) fn new(id: String) -> Self {
        Self {
            id,
            info: FetchSlot::default(),
            time: TimeState::default(),
            fixed: FetchSlot::default(),
        }
    }
}
