//! Response normalization pipeline.
//!
//! Pure, synchronous functions that turn raw wire bodies from
//! `netmeter-api` into canonical [`crate::model`] values. Every transform
//! is total over its input shape and fail-soft: a body missing its
//! expected section normalizes to an empty/absent result instead of an
//! error.
//!
//! Transforms consume the raw body and produce a distinct normalized
//! type, so a value can only be normalized once -- re-transformation of
//! cached data is unrepresentable rather than guarded by a sentinel.

mod fixed;
mod isp;
mod labels;
mod listings;
mod location;
mod series;

pub use fixed::fixed_data;
pub use isp::{
    client_isp_info, client_isp_meta, composite_info, transit_isp_info, transit_isp_meta,
};
pub use labels::clean_isp_label;
pub use listings::{
    client_isp_search_results, location_search_results, top_client_isps, top_locations,
    top_transit_isps, transit_isp_search_results,
};
pub use location::{location_info, location_meta};
pub use series::{compute_extents, hourly, time_series};
