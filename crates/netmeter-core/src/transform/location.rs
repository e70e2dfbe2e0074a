// ── Location normalization ──

use netmeter_api::models::{RawInfoBody, RawMeta};

use super::labels::location_labels;
use crate::model::{LocationMeta, LocationParent, LocationType};

/// Normalize a location info body. A body without `meta` yields `None`
/// (nothing to enrich).
pub fn location_info(body: RawInfoBody) -> Option<LocationMeta> {
    body.meta.map(location_meta)
}

/// Normalize raw location metadata: derive labels, the backend id, and
/// the ancestor chain. The wire `parent_location_key` is dropped --
/// `parents` supersedes it.
pub fn location_meta(meta: RawMeta) -> LocationMeta {
    let (short_label, long_label) = location_labels(&meta);
    let location_type = LocationType::parse(meta.meta_type.as_deref());
    let parents = parent_chain(&meta, location_type);

    let id = meta.location_key.or(meta.client_location_key);

    LocationMeta {
        id,
        label: short_label.clone(),
        name: short_label.clone(),
        short_label,
        long_label,
        city: meta.client_city,
        region: meta.client_region,
        country: meta.client_country,
        continent: meta.client_continent,
        region_code: meta.client_region_code,
        country_code: meta.client_country_code,
        continent_code: meta.client_continent_code,
        location_type,
        latitude: meta.latitude,
        longitude: meta.longitude,
        test_count: meta.test_count.unwrap_or(0),
        parents,
    }
}

/// Build the ancestor chain for a location.
///
/// Which ancestor fields apply depends on the location's granularity:
/// continents have none, countries sit under a continent, regions under
/// continent+country, and cities (or anything unrecognized) under all
/// three. Each ancestor's `id` is the cumulative lowercase-code
/// concatenation, matching the backend location-key convention.
fn parent_chain(meta: &RawMeta, location_type: LocationType) -> Vec<LocationParent> {
    let fields: &[(Option<&String>, Option<&String>)] = &[
        (meta.client_continent.as_ref(), meta.client_continent_code.as_ref()),
        (meta.client_country.as_ref(), meta.client_country_code.as_ref()),
        (meta.client_region.as_ref(), meta.client_region_code.as_ref()),
    ];

    let depth = match location_type {
        LocationType::Continent => 0,
        LocationType::Country => 1,
        LocationType::Region => 2,
        LocationType::City | LocationType::Unknown => 3,
    };

    let mut accumulated_code = String::new();
    let mut parents = Vec::new();

    for (label, code) in &fields[..depth] {
        // An ancestor needs both a label and a code; the code feeds the
        // cumulative id, so an entry without one is unusable.
        let (Some(label), Some(code)) = (label, code) else {
            continue;
        };
        accumulated_code.push_str(&code.to_lowercase());
        parents.push(LocationParent {
            id: accumulated_code.clone(),
            label: (*label).clone(),
            code: (*code).clone(),
        });
    }

    parents
}
