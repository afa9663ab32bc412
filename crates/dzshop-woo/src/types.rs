//! WooCommerce shipping API response types.
//!
//! All types model the JSON structures returned by the WooCommerce REST API.
//! They derive `Serialize` as well because the storefront's own zones
//! endpoint re-emits locations and methods verbatim inside its aggregated
//! envelope.

use serde::{Deserialize, Serialize};

/// A shipping zone as returned by `GET shipping/zones` (no locations or
/// methods — those live behind per-zone sub-endpoints).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingZoneInfo {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub order: i64,
}

/// Granularity of a zone location rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneLocationType {
    Postcode,
    State,
    Country,
    Continent,
}

/// A single location rule from `GET shipping/zones/{id}/locations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneLocation {
    pub code: String,
    #[serde(rename = "type")]
    pub location_type: ZoneLocationType,
}

/// A shipping method instance from `GET shipping/zones/{id}/methods`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneMethod {
    pub instance_id: i64,
    pub title: String,
    #[serde(default)]
    pub order: i64,
    pub enabled: bool,
    pub method_id: String,
    #[serde(default)]
    pub method_title: String,
    #[serde(default)]
    pub method_description: String,
    #[serde(default)]
    pub settings: MethodSettings,
}

/// Per-instance method settings. WooCommerce wraps every setting in an
/// object carrying the admin-facing metadata; only `value` matters here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<SettingValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<SettingValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<SettingValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<SettingValue>,
}

/// The `{ "value": "..." }` wrapper WooCommerce uses for settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingValue {
    pub value: String,
}
