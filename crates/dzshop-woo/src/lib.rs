//! Typed HTTP client for the WooCommerce REST API (`wp-json/wc/v3`).
//!
//! Covers the shipping-zone surface the storefront needs: the zone list,
//! per-zone location rules, and per-zone shipping methods. Transient
//! upstream failures are retried with exponential back-off and jitter.

mod client;
mod error;
mod retry;
mod types;

pub use client::WooClient;
pub use error::WooError;
pub use types::{
    MethodSettings, SettingValue, ShippingZoneInfo, ZoneLocation, ZoneLocationType, ZoneMethod,
};
