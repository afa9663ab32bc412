//! HTTP client for the WooCommerce REST API.
//!
//! Wraps `reqwest` with Basic-auth credential handling, base-URL
//! normalization, typed response deserialization, and retry on transient
//! upstream failures.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::WooError;
use crate::retry::retry_with_backoff;
use crate::types::{ShippingZoneInfo, ZoneLocation, ZoneMethod};

const API_PREFIX: &str = "wp-json/wc/v3";
const USER_AGENT: &str = "dzshop/0.1 (storefront)";

/// Client for the WooCommerce REST API.
///
/// Manages the HTTP client, consumer credentials, and base URL. Point it at
/// the store root (e.g. `https://boutique.example.dz`); the `wp-json/wc/v3`
/// prefix is appended here. A wiremock server URL works the same way in
/// tests.
pub struct WooClient {
    client: Client,
    base_url: Url,
    consumer_key: String,
    consumer_secret: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl WooClient {
    /// Creates a new client for the given store.
    ///
    /// `max_retries` is the number of additional attempts after the first
    /// failure for transient errors; set to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`WooError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`WooError::InvalidStoreUrl`] if `store_url` is not
    /// a valid URL base.
    pub fn new(
        store_url: &str,
        consumer_key: &str,
        consumer_secret: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, WooError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        // Normalise: exactly one trailing slash so Url::join treats the API
        // prefix as a child path instead of replacing the last segment.
        let normalised = format!("{}/{API_PREFIX}/", store_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| WooError::InvalidStoreUrl {
            url: store_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            consumer_key: consumer_key.to_owned(),
            consumer_secret: consumer_secret.to_owned(),
            max_retries,
            backoff_base_ms,
        })
    }

    /// Fetches the full list of shipping zones.
    ///
    /// Note: WooCommerce returns zones without their location rules or
    /// methods; use [`WooClient::get_zone_locations`] and
    /// [`WooClient::get_zone_methods`] per zone.
    ///
    /// # Errors
    ///
    /// - [`WooError::UnexpectedStatus`] on a non-2xx response after retries.
    /// - [`WooError::Http`] on network failure after retries.
    /// - [`WooError::Deserialize`] if the body does not match the expected shape.
    pub async fn get_shipping_zones(&self) -> Result<Vec<ShippingZoneInfo>, WooError> {
        let url = self.endpoint_url("shipping/zones")?;
        self.get_json(url, "shipping/zones").await
    }

    /// Fetches the location rules attached to a shipping zone.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`WooClient::get_shipping_zones`].
    pub async fn get_zone_locations(&self, zone_id: i64) -> Result<Vec<ZoneLocation>, WooError> {
        let path = format!("shipping/zones/{zone_id}/locations");
        let url = self.endpoint_url(&path)?;
        self.get_json(url, &path).await
    }

    /// Fetches the shipping-method instances attached to a shipping zone.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`WooClient::get_shipping_zones`].
    pub async fn get_zone_methods(&self, zone_id: i64) -> Result<Vec<ZoneMethod>, WooError> {
        let path = format!("shipping/zones/{zone_id}/methods");
        let url = self.endpoint_url(&path)?;
        self.get_json(url, &path).await
    }

    /// Builds the full request URL for an API path under `wp-json/wc/v3/`.
    fn endpoint_url(&self, path: &str) -> Result<Url, WooError> {
        self.base_url.join(path).map_err(|e| WooError::InvalidStoreUrl {
            url: self.base_url.to_string(),
            reason: e.to_string(),
        })
    }

    /// Sends an authenticated GET, asserts a 2xx status, and parses the body,
    /// retrying transient failures with back-off.
    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, WooError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    return Err(WooError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<T>(&body).map_err(|e| WooError::Deserialize {
                    context: context.to_owned(),
                    source: e,
                })
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(store_url: &str) -> WooClient {
        WooClient::new(store_url, "ck_test", "cs_test", 30, 0, 0)
            .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_url_appends_api_prefix() {
        let client = test_client("https://boutique.example.dz");
        let url = client.endpoint_url("shipping/zones").unwrap();
        assert_eq!(
            url.as_str(),
            "https://boutique.example.dz/wp-json/wc/v3/shipping/zones"
        );
    }

    #[test]
    fn endpoint_url_strips_trailing_slash() {
        let client = test_client("https://boutique.example.dz/");
        let url = client.endpoint_url("shipping/zones/4/methods").unwrap();
        assert_eq!(
            url.as_str(),
            "https://boutique.example.dz/wp-json/wc/v3/shipping/zones/4/methods"
        );
    }

    #[test]
    fn new_rejects_unparseable_store_url() {
        let result = WooClient::new("not a url", "ck", "cs", 30, 0, 0);
        assert!(matches!(result, Err(WooError::InvalidStoreUrl { .. })));
    }
}
