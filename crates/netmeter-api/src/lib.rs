// netmeter-api: Async Rust client for the netmeter measurement API

pub mod client;
pub mod error;
pub mod models;
pub mod params;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use params::{DateRange, TimeAggregation};
pub use transport::TransportConfig;
