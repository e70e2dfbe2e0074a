// ── Location domain types ──

use serde::{Deserialize, Serialize};
use strum::Display;

/// Location granularity, from most to least specific.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Default,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    City,
    Region,
    Country,
    Continent,
    #[default]
    Unknown,
}

impl LocationType {
    /// Parse the wire `type` field; anything unrecognized is `Unknown`.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("city") => Self::City,
            Some("region") => Self::Region,
            Some("country") => Self::Country,
            Some("continent") => Self::Continent,
            _ => Self::Unknown,
        }
    }

    /// Ordering used when ranking mixed-granularity listings:
    /// cities first, then regions, countries, continents, unknown last.
    pub fn sort_priority(self) -> u8 {
        match self {
            Self::City => 1,
            Self::Region => 2,
            Self::Country => 3,
            Self::Continent => 4,
            Self::Unknown => 5,
        }
    }
}

/// One ancestor in a location's hierarchy.
///
/// `id` is the cumulative lowercase-code concatenation down to this
/// ancestor (continent code, then continent+country, then +region),
/// matching the backend's location-key convention so parent lookups
/// round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationParent {
    pub id: String,
    pub label: String,
    pub code: String,
}

/// Canonical location metadata, enriched with display labels and the
/// ancestor chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationMeta {
    /// Backend location key.
    pub id: Option<String>,
    /// Display label (same as `short_label`).
    pub label: String,
    /// Most specific place name alone.
    pub short_label: String,
    /// Place name with its disambiguating region or country suffix.
    pub long_label: String,
    pub name: String,

    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub continent: Option<String>,
    pub region_code: Option<String>,
    pub country_code: Option<String>,
    pub continent_code: Option<String>,

    pub location_type: LocationType,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub test_count: i64,

    /// Ordered ancestor chain, outermost first.
    pub parents: Vec<LocationParent>,
}
