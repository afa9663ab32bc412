//! Zone envelope and normalized shipping types.
//!
//! [`ZonesEnvelope`] and [`ZoneSnapshot`] mirror the JSON of the
//! storefront's aggregated zones endpoint (raw WooCommerce locations and
//! methods pass through verbatim). The `Parsed*` types are the normalized
//! shapes the resolver and facade work with; once constructed they are
//! immutable — the repository hands out `Arc<Vec<ParsedShippingZone>>` and
//! consumers never mutate it.

use serde::{Deserialize, Serialize};

use dzshop_woo::{ZoneLocation, ZoneMethod};

/// Envelope of the aggregated zones endpoint:
/// `{ success, zones, totalZones, activeZones }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZonesEnvelope {
    pub success: bool,
    #[serde(default)]
    pub zones: Vec<ZoneSnapshot>,
    #[serde(rename = "totalZones", default)]
    pub total_zones: usize,
    #[serde(rename = "activeZones", default)]
    pub active_zones: usize,
}

/// One shipping zone with its location rules and enabled methods, as
/// aggregated by the zones endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneSnapshot {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub locations: Vec<ZoneLocation>,
    #[serde(default)]
    pub methods: Vec<ZoneMethod>,
}

/// A normalized shipping method. `cost` is always a non-negative flat rate
/// (see [`crate::parse_cost`]); `description` is HTML-stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedShippingMethod {
    pub id: i64,
    pub method_id: String,
    pub title: String,
    pub cost: f64,
    pub description: String,
    pub is_free: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<f64>,
}

/// A normalized shipping zone: flattened location codes plus parsed methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedShippingZone {
    pub id: i64,
    pub name: String,
    pub locations: Vec<String>,
    pub methods: Vec<ParsedShippingMethod>,
}

/// Closed classification of how a method hands the parcel to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    /// Home / door delivery.
    Domicile,
    /// Pickup point / stop desk.
    Stopdesk,
    /// Neither recognized.
    Other,
}

/// A parsed method enriched with its delivery-type classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WilayaShippingMethod {
    pub id: i64,
    pub method_id: String,
    pub title: String,
    pub cost: f64,
    pub description: String,
    pub is_free: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<f64>,
    pub delivery_type: DeliveryType,
}

/// Resolved shipping data for one wilaya.
///
/// `domicile_price` is the cost of the first method classified
/// [`DeliveryType::Domicile`] (0 if none); likewise `stopdesk_price`.
/// `cheapest_method` prefers a free method over any paid one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WilayaShippingData {
    pub zone_name: String,
    pub zone_id: i64,
    pub methods: Vec<WilayaShippingMethod>,
    pub domicile_price: f64,
    pub stopdesk_price: f64,
    pub cheapest_method: Option<WilayaShippingMethod>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_deserializes_camel_case_counts() {
        let raw = serde_json::json!({
            "success": true,
            "zones": [],
            "totalZones": 4,
            "activeZones": 2
        });
        let envelope: ZonesEnvelope = serde_json::from_value(raw).expect("should deserialize");
        assert!(envelope.success);
        assert_eq!(envelope.total_zones, 4);
        assert_eq!(envelope.active_zones, 2);
    }

    #[test]
    fn envelope_roundtrips_field_names() {
        let envelope = ZonesEnvelope {
            success: true,
            zones: vec![],
            total_zones: 1,
            active_zones: 1,
        };
        let rendered = serde_json::to_value(&envelope).expect("should serialize");
        assert_eq!(rendered["totalZones"], 1);
        assert_eq!(rendered["activeZones"], 1);
    }

    #[test]
    fn delivery_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&DeliveryType::Stopdesk).unwrap(),
            "\"stopdesk\""
        );
    }
}
