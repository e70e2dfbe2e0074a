// ── ISP normalization ──

use netmeter_api::models::{RawInfoBody, RawMeta};

use super::labels::isp_label;
use super::location::location_meta;
use crate::model::{ClientIspMeta, CompositeMeta, TransitIspMeta};

/// Normalize a client-ISP info body.
pub fn client_isp_info(body: RawInfoBody) -> Option<ClientIspMeta> {
    body.meta.map(client_isp_meta)
}

/// Normalize raw client-ISP metadata from the `client_asn_*` fields.
pub fn client_isp_meta(meta: RawMeta) -> ClientIspMeta {
    let label = isp_label(
        meta.client_asn_name.as_deref(),
        meta.client_asn_number.as_deref(),
    );

    ClientIspMeta {
        id: meta.client_asn_number.clone(),
        asn_name: (!label.is_empty()).then(|| label.clone()),
        asn_number: meta.client_asn_number,
        name: label.clone(),
        label,
        test_count: meta.test_count.unwrap_or(0),
    }
}

/// Normalize a transit-ISP info body.
pub fn transit_isp_info(body: RawInfoBody) -> Option<TransitIspMeta> {
    body.meta.map(transit_isp_meta)
}

/// Normalize raw transit-ISP metadata from the `server_asn_*` fields.
pub fn transit_isp_meta(meta: RawMeta) -> TransitIspMeta {
    let label = isp_label(
        meta.server_asn_name.as_deref(),
        meta.server_asn_number.as_deref(),
    );

    TransitIspMeta {
        id: meta.server_asn_number.clone(),
        asn_name: (!label.is_empty()).then(|| label.clone()),
        asn_number: meta.server_asn_number,
        name: label.clone(),
        label,
        test_count: meta.test_count.unwrap_or(0),
    }
}

/// Normalize the flat meta of a composite entity (location x client ISP
/// and friends): each component present on the wire is normalized
/// independently.
pub fn composite_info(body: RawInfoBody) -> Option<CompositeMeta> {
    let meta = body.meta?;

    let has_location = meta.client_city.is_some()
        || meta.client_region.is_some()
        || meta.client_country.is_some()
        || meta.client_continent.is_some()
        || meta.location_key.is_some()
        || meta.client_location_key.is_some();
    let has_client_isp = meta.client_asn_name.is_some() || meta.client_asn_number.is_some();
    let has_transit_isp = meta.server_asn_name.is_some() || meta.server_asn_number.is_some();

    Some(CompositeMeta {
        location: has_location.then(|| location_meta(meta.clone())),
        client_isp: has_client_isp.then(|| client_isp_meta(meta.clone())),
        transit_isp: has_transit_isp.then(|| transit_isp_meta(meta)),
    })
}
