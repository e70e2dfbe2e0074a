// ── ISP domain types ──

use serde::{Deserialize, Serialize};

use super::location::LocationMeta;

/// Canonical client-ISP metadata.
///
/// `label` is the cleaned ASN name, falling back to the ASN number when
/// the backend has no name on file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientIspMeta {
    /// ASN number, used as the cache id.
    pub id: Option<String>,
    pub asn_name: Option<String>,
    pub asn_number: Option<String>,
    pub label: String,
    pub name: String,
    pub test_count: i64,
}

/// Canonical transit-ISP metadata. Same shape as [`ClientIspMeta`] but
/// sourced from the `server_asn_*` wire fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitIspMeta {
    /// ASN number, used as the cache id.
    pub id: Option<String>,
    pub asn_name: Option<String>,
    pub asn_number: Option<String>,
    pub label: String,
    pub name: String,
    pub test_count: i64,
}

/// Metadata for a composite entity (location x client ISP, etc.).
///
/// The backend returns one flat meta object carrying whichever fields
/// apply; each present component is normalized independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeMeta {
    pub location: Option<LocationMeta>,
    pub client_isp: Option<ClientIspMeta>,
    pub transit_isp: Option<TransitIspMeta>,
}
