//! Data layer between `netmeter-api` and UI consumers.
//!
//! This crate owns the domain model and data-shaping logic for the
//! netmeter workspace:
//!
//! - **[`metrics`]** — the static metric and facet-type catalogs, with
//!   explicit resolve-with-default lookups.
//!
//! - **[`transform`]** — pure functions that normalize raw wire bodies
//!   into canonical typed values: date decoding, extent computation,
//!   hierarchical location labeling, ISP label cleanup, fixed-window
//!   prefix grouping, and percent-bin derivation. Transforms consume the
//!   raw body and produce a distinct normalized type, so applying a
//!   transform twice is unrepresentable.
//!
//! - **[`DataStore`]** — concurrent keyed cache of entity state. Each
//!   entity holds one [`FetchSlot`] per sub-resource (info, time series,
//!   hourly, fixed window) tracking fetch lifecycle and data.
//!
//! - **[`FetchCoordinator`]** — decides per (entity, sub-resource,
//!   aggregation) key whether a network fetch is needed, marks the slot
//!   before suspending, and settles it with normalized data or an error.
//!
//! - **[`Status`]** — the five-state loading model and the priority
//!   merge used when composing many concurrent fetches into one
//!   dashboard-level status.

pub mod coordinator;
pub mod error;
pub mod metrics;
pub mod model;
pub mod store;
pub mod transform;
pub mod views;

pub use coordinator::FetchCoordinator;
pub use error::CoreError;
pub use store::status::{Status, merge_statuses};
pub use store::{DataStore, FetchSlot};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    AsnId,
    ClientIspMeta,
    CompositeMeta,
    EntityRef,
    Extents,
    FixedWindowData,
    LocationId,
    LocationMeta,
    LocationParent,
    LocationType,
    TimeSeriesData,
    TimeSeriesPoint,
    TransitIspMeta,
    WindowSummary,
};

// The aggregation and range types travel with every series request;
// re-export them so consumers rarely need netmeter-api directly.
pub use netmeter_api::{DateRange, TimeAggregation};
