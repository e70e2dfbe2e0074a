// ── Display label derivation ──
//
// Locations label by the most specific place name available, with a
// disambiguating suffix for cities and regions. ISP labels come from the
// ASN name (ASN number when unnamed) run through an ordered find/replace
// list that trims the verbose legal names ASN registries carry.

use netmeter_api::models::RawMeta;

/// Ordered find/replace cleanups for ISP labels. Specific carrier names
/// first, generic corporate-suffix strips last. Each rule replaces the
/// first occurrence only.
pub(crate) static ISP_LABEL_REPLACEMENTS: &[(&str, &str)] = &[
    ("Time Warner Cable Internet LLC", "Time Warner Cable"),
    (
        "MCI Communications Services, Inc. d/b/a Verizon Business",
        "Verizon Business",
    ),
    ("Comcast Cable Communications, Inc.", "Comcast Cable"),
    ("Comcast Cable Communications, LLC", "Comcast Cable"),
    ("Cablevision Systems Corp.", "Cablevision"),
    ("CenturyLink Communications, LLC", "CenturyLink"),
    ("Frontier Communications of America, Inc.", "Frontier"),
    ("Level 3 Communications, Inc.", "Level 3"),
    (", Inc.", ""),
    (", LLC", ""),
    (", Ltd.", ""),
    (" Inc.", ""),
    (" LLC", ""),
];

/// Apply the ordered label cleanups to an ISP name.
pub fn clean_isp_label(label: &str) -> String {
    let mut label = label.to_owned();
    for (find, replace) in ISP_LABEL_REPLACEMENTS {
        if label.contains(find) {
            label = label.replacen(find, replace, 1);
        }
    }
    label.trim().to_owned()
}

/// ISP display label: ASN name when present and non-empty, else the ASN
/// number, cleaned either way.
pub(crate) fn isp_label(asn_name: Option<&str>, asn_number: Option<&str>) -> String {
    let base = match asn_name {
        Some(name) if !name.is_empty() => name,
        _ => asn_number.unwrap_or(""),
    };
    clean_isp_label(base)
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// Location labels: `(short, long)`.
///
/// Short label is the first non-empty of city, region, country,
/// continent. The long label disambiguates: US cities get their region,
/// other cities get their country, regions get their country.
pub(crate) fn location_labels(meta: &RawMeta) -> (String, String) {
    let short = non_empty(meta.client_city.as_ref())
        .or_else(|| non_empty(meta.client_region.as_ref()))
        .or_else(|| non_empty(meta.client_country.as_ref()))
        .or_else(|| non_empty(meta.client_continent.as_ref()))
        .unwrap_or("")
        .to_owned();

    let suffix = match meta.meta_type.as_deref() {
        Some("city") => {
            if meta.client_country.as_deref() == Some("United States") {
                non_empty(meta.client_region.as_ref())
            } else {
                non_empty(meta.client_country.as_ref())
            }
        }
        Some("region") => non_empty(meta.client_country.as_ref()),
        _ => None,
    };

    let long = match suffix {
        Some(suffix) => format!("{short}, {suffix}"),
        None => short.clone(),
    };

    (short, long)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(value: serde_json::Value) -> RawMeta {
        serde_json::from_value(value).unwrap_or_default()
    }

    #[test]
    fn us_city_gets_region_suffix() {
        let (short, long) = location_labels(&meta(json!({
            "client_city": "Seattle",
            "client_region": "WA",
            "client_country": "United States",
            "type": "city"
        })));
        assert_eq!(short, "Seattle");
        assert_eq!(long, "Seattle, WA");
    }

    #[test]
    fn non_us_city_gets_country_suffix() {
        let (short, long) = location_labels(&meta(json!({
            "client_city": "Paris",
            "client_country": "France",
            "type": "city"
        })));
        assert_eq!(short, "Paris");
        assert_eq!(long, "Paris, France");
    }

    #[test]
    fn region_gets_country_suffix() {
        let (short, long) = location_labels(&meta(json!({
            "client_region": "Ontario",
            "client_country": "Canada",
            "type": "region"
        })));
        assert_eq!(short, "Ontario");
        assert_eq!(long, "Ontario, Canada");
    }

    #[test]
    fn short_label_precedence_skips_missing_fields() {
        let (short, _) = location_labels(&meta(json!({
            "client_country": "Japan",
            "client_continent": "Asia",
            "type": "country"
        })));
        assert_eq!(short, "Japan");
    }

    #[test]
    fn country_and_continent_take_no_suffix() {
        let (_, long) = location_labels(&meta(json!({
            "client_country": "Japan",
            "type": "country"
        })));
        assert_eq!(long, "Japan");
    }

    #[test]
    fn clean_label_applies_specific_rule_before_suffix_strip() {
        assert_eq!(
            clean_isp_label("Time Warner Cable Internet LLC"),
            "Time Warner Cable"
        );
    }

    #[test]
    fn clean_label_strips_corporate_suffixes() {
        assert_eq!(clean_isp_label("AT&T Services, Inc."), "AT&T Services");
        assert_eq!(clean_isp_label("Telefonica del Peru S.A.A., Inc."), "Telefonica del Peru S.A.A.");
    }

    #[test]
    fn isp_label_falls_back_to_asn_number() {
        assert_eq!(isp_label(None, Some("AS7922")), "AS7922");
        assert_eq!(isp_label(Some(""), Some("AS7922")), "AS7922");
        assert_eq!(isp_label(Some("Comcast Cable Communications, LLC"), Some("AS7922")), "Comcast Cable");
    }

    #[test]
    fn isp_label_with_nothing_is_empty() {
        assert_eq!(isp_label(None, None), "");
    }
}
