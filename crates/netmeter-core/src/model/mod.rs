//! Canonical domain model.
//!
//! Typed, normalized values produced by the [`crate::transform`] pipeline
//! from raw wire bodies. These are what the store caches and what UI
//! consumers read.

pub mod fixed;
pub mod isp;
pub mod keys;
pub mod location;
pub mod series;

pub use fixed::{FixedWindowData, WindowSummary};
pub use isp::{ClientIspMeta, CompositeMeta, TransitIspMeta};
pub use keys::{AsnId, EntityRef, LocationId};
pub use location::{LocationMeta, LocationParent, LocationType};
pub use series::{Extents, TimeSeriesData, TimeSeriesPoint};
