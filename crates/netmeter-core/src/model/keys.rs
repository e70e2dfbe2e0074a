// ── Core identity types ──
//
// LocationId, AsnId, and EntityRef form the foundation of every cache
// lookup. Composite cache keys are built by joining component ids in a
// fixed order; that ordering is a wire-level contract consumers rely on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use netmeter_api::client::EntityPath;

// ── LocationId ──────────────────────────────────────────────────────

/// Backend location key: the lowercase concatenation of geo codes from
/// continent down (e.g. `nauswaseattle`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(String);

impl LocationId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocationId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for LocationId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// ── AsnId ───────────────────────────────────────────────────────────

/// ASN identifier for a client or transit ISP (e.g. `AS7922`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AsnId(String);

impl AsnId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AsnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AsnId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for AsnId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// ── EntityRef ───────────────────────────────────────────────────────

/// Reference to a cacheable entity: one of the three base kinds, or a
/// composite of them.
///
/// Composite cache keys join component ids with `_` in the fixed order
/// **location, client ISP, transit ISP**. Changing this order would
/// silently orphan every composite cache entry, so it is part of the
/// public contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Location(LocationId),
    ClientIsp(AsnId),
    TransitIsp(AsnId),
    LocationClientIsp(LocationId, AsnId),
    LocationTransitIsp(LocationId, AsnId),
    ClientIspTransitIsp(AsnId, AsnId),
    LocationClientIspTransitIsp(LocationId, AsnId, AsnId),
}

impl EntityRef {
    /// The deterministic cache key for this entity.
    pub fn cache_key(&self) -> String {
        match self {
            Self::Location(l) => l.to_string(),
            Self::ClientIsp(c) | Self::TransitIsp(c) => c.to_string(),
            Self::LocationClientIsp(l, c) => format!("{l}_{c}"),
            Self::LocationTransitIsp(l, t) => format!("{l}_{t}"),
            Self::ClientIspTransitIsp(c, t) => format!("{c}_{t}"),
            Self::LocationClientIspTransitIsp(l, c, t) => format!("{l}_{c}_{t}"),
        }
    }

    /// The API endpoint path for this entity.
    pub(crate) fn to_path(&self) -> EntityPath {
        match self {
            Self::Location(l) => EntityPath::Location(l.to_string()),
            Self::ClientIsp(c) => EntityPath::ClientIsp(c.to_string()),
            Self::TransitIsp(t) => EntityPath::TransitIsp(t.to_string()),
            Self::LocationClientIsp(l, c) => {
                EntityPath::LocationClientIsp(l.to_string(), c.to_string())
            }
            Self::LocationTransitIsp(l, t) => {
                EntityPath::LocationTransitIsp(l.to_string(), t.to_string())
            }
            Self::ClientIspTransitIsp(c, t) => {
                EntityPath::ClientIspTransitIsp(c.to_string(), t.to_string())
            }
            Self::LocationClientIspTransitIsp(l, c, t) => {
                EntityPath::LocationClientIspTransitIsp(l.to_string(), c.to_string(), t.to_string())
            }
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_key_orders_location_before_client_before_transit() {
        let key = EntityRef::LocationClientIspTransitIsp(
            LocationId::from("nauswaseattle"),
            AsnId::from("AS7922"),
            AsnId::from("AS3356"),
        )
        .cache_key();
        assert_eq!(key, "nauswaseattle_AS7922_AS3356");
    }

    #[test]
    fn pair_keys_follow_same_order() {
        let l = LocationId::from("nauswaseattle");
        let c = AsnId::from("AS7922");
        let t = AsnId::from("AS3356");

        assert_eq!(
            EntityRef::LocationClientIsp(l.clone(), c.clone()).cache_key(),
            "nauswaseattle_AS7922"
        );
        assert_eq!(
            EntityRef::LocationTransitIsp(l, t.clone()).cache_key(),
            "nauswaseattle_AS3356"
        );
        assert_eq!(
            EntityRef::ClientIspTransitIsp(c, t).cache_key(),
            "AS7922_AS3356"
        );
    }

    #[test]
    fn single_entity_key_is_its_id() {
        assert_eq!(
            EntityRef::Location(LocationId::from("eufrparis")).cache_key(),
            "eufrparis"
        );
    }
}
