//! Dynamic shipping-rate resolution for the dzshop storefront.
//!
//! Maps a customer's wilaya to a shipping zone and concrete delivery prices,
//! sourced from the storefront's aggregated WooCommerce zones endpoint. The
//! zone list is held in a three-tier cache: an in-memory record with a TTL
//! and in-flight request collapsing, a durable JSON mirror that survives
//! restarts, and a per-wilaya memo of derived results.

mod classify;
mod cost;
mod error;
mod normalize;
mod rates;
mod regions;
mod resolve;
mod store;
mod types;
mod wilaya;
mod zones;

pub use classify::classify;
pub use cost::parse_cost;
pub use error::ShippingError;
pub use rates::{
    has_custom_rates, is_free_shipping, rates_for, static_price, ShippingRate, ShippingSettings,
    SETTINGS,
};
pub use regions::{location_code, WILAYA_LOCATION_CODES};
pub use resolve::find_zone_for_location;
pub use store::{CacheStore, FileCacheStore, MemoryCacheStore};
pub use types::{
    DeliveryType, ParsedShippingMethod, ParsedShippingZone, WilayaShippingData,
    WilayaShippingMethod, ZoneSnapshot, ZonesEnvelope,
};
pub use wilaya::{WilayaShipping, WilayaShippingStatus};
pub use zones::{ZoneRepository, ZONES_CACHE_KEY};
