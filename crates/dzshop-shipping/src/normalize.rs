//! Normalization of aggregated zone snapshots into resolver-ready types.

use regex::Regex;

use crate::cost::parse_cost;
use crate::types::{ParsedShippingMethod, ParsedShippingZone, ZoneSnapshot};

use dzshop_woo::ZoneMethod;

/// Converts an aggregated zone snapshot into a [`ParsedShippingZone`]:
/// location rules flatten to bare codes, methods go through cost parsing,
/// HTML stripping, and the free-shipping flag.
#[must_use]
pub(crate) fn normalize_zone(zone: ZoneSnapshot) -> ParsedShippingZone {
    ParsedShippingZone {
        id: zone.id,
        name: zone.name,
        locations: zone.locations.into_iter().map(|l| l.code).collect(),
        methods: zone.methods.into_iter().map(normalize_method).collect(),
    }
}

fn normalize_method(method: ZoneMethod) -> ParsedShippingMethod {
    let raw_cost = method.settings.cost.as_ref().map(|c| c.value.as_str());
    let cost = parse_cost(raw_cost);
    if cost == 0.0 {
        if let Some(raw) = raw_cost {
            let trimmed = raw.trim();
            // A purely multiplicative formula ("[qty] * 200") parses to 0 and
            // silently understates the rate — make that visible in logs.
            if !trimmed.is_empty() && !trimmed.starts_with('0') {
                tracing::warn!(
                    method_id = %method.method_id,
                    raw_cost = %raw,
                    "shipping cost string parsed to zero"
                );
            }
        }
    }

    ParsedShippingMethod {
        id: method.instance_id,
        is_free: method.method_id == "free_shipping",
        title: method_title(&method),
        cost,
        description: strip_html(&method.method_description),
        min_amount: method
            .settings
            .min_amount
            .as_ref()
            .and_then(|m| m.value.parse::<f64>().ok()),
        method_id: method.method_id,
    }
}

/// Display title fallback chain: instance setting → instance title →
/// method title. Empty strings fall through.
fn method_title(method: &ZoneMethod) -> String {
    let from_settings = method
        .settings
        .title
        .as_ref()
        .map(|t| t.value.as_str())
        .unwrap_or_default();
    [from_settings, &method.title, &method.method_title]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_owned()
}

/// Strips HTML tags from a method description and trims the result.
fn strip_html(raw: &str) -> String {
    let tags = Regex::new(r"<[^>]*>").expect("valid tags regex");
    tags.replace_all(raw, "").trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dzshop_woo::{MethodSettings, SettingValue, ZoneLocation, ZoneLocationType};

    fn method(method_id: &str, title: &str, cost: Option<&str>) -> ZoneMethod {
        ZoneMethod {
            instance_id: 1,
            title: title.to_owned(),
            order: 0,
            enabled: true,
            method_id: method_id.to_owned(),
            method_title: "Méthode".to_owned(),
            method_description: String::new(),
            settings: MethodSettings {
                cost: cost.map(|c| SettingValue { value: c.to_owned() }),
                ..MethodSettings::default()
            },
        }
    }

    #[test]
    fn zone_flattens_location_codes() {
        let zone = ZoneSnapshot {
            id: 4,
            name: "Centre".to_owned(),
            order: 0,
            locations: vec![
                ZoneLocation {
                    code: "DZ:DZ-16".to_owned(),
                    location_type: ZoneLocationType::State,
                },
                ZoneLocation {
                    code: "DZ".to_owned(),
                    location_type: ZoneLocationType::Country,
                },
            ],
            methods: vec![],
        };
        let parsed = normalize_zone(zone);
        assert_eq!(parsed.locations, vec!["DZ:DZ-16", "DZ"]);
    }

    #[test]
    fn method_cost_is_parsed_from_settings() {
        let zone = ZoneSnapshot {
            id: 1,
            name: "Centre".to_owned(),
            order: 0,
            locations: vec![],
            methods: vec![method("flat_rate", "Domicile", Some("500.00 * [qty]"))],
        };
        let parsed = normalize_zone(zone);
        assert_eq!(parsed.methods[0].cost, 500.0);
        assert!(!parsed.methods[0].is_free);
    }

    #[test]
    fn free_shipping_method_id_sets_flag() {
        let zone = ZoneSnapshot {
            id: 1,
            name: "Centre".to_owned(),
            order: 0,
            locations: vec![],
            methods: vec![method("free_shipping", "Livraison gratuite", None)],
        };
        let parsed = normalize_zone(zone);
        assert!(parsed.methods[0].is_free);
        assert_eq!(parsed.methods[0].cost, 0.0);
    }

    #[test]
    fn title_prefers_instance_setting() {
        let mut m = method("flat_rate", "Instance title", Some("100"));
        m.settings.title = Some(SettingValue {
            value: "Titre personnalisé".to_owned(),
        });
        assert_eq!(method_title(&m), "Titre personnalisé");
    }

    #[test]
    fn title_falls_back_through_empty_strings() {
        let mut m = method("flat_rate", "", Some("100"));
        m.settings.title = Some(SettingValue { value: String::new() });
        assert_eq!(method_title(&m), "Méthode");
    }

    #[test]
    fn description_is_html_stripped() {
        let mut m = method("flat_rate", "Domicile", Some("100"));
        m.method_description = "<p>Lets you charge <strong>a fixed rate</strong>.</p>".to_owned();
        let zone = ZoneSnapshot {
            id: 1,
            name: "Centre".to_owned(),
            order: 0,
            locations: vec![],
            methods: vec![m],
        };
        let parsed = normalize_zone(zone);
        assert_eq!(parsed.methods[0].description, "Lets you charge a fixed rate.");
    }

    #[test]
    fn min_amount_parses_when_numeric() {
        let mut m = method("free_shipping", "Gratuite", None);
        m.settings.min_amount = Some(SettingValue {
            value: "5000".to_owned(),
        });
        let zone = ZoneSnapshot {
            id: 1,
            name: "Centre".to_owned(),
            order: 0,
            locations: vec![],
            methods: vec![m],
        };
        let parsed = normalize_zone(zone);
        assert_eq!(parsed.methods[0].min_amount, Some(5000.0));
    }
}
