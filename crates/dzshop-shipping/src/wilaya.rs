//! Wilaya-facing shipping queries.
//!
//! [`WilayaShipping`] is the surface the checkout and cart layers talk to:
//! give it a wilaya name, get back delivery methods, per-type prices, and a
//! default selection. Derived results are memoized per wilaya and tied to
//! the zone list `Arc` that produced them, so a zone refetch invalidates
//! every entry without bookkeeping.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::classify::classify;
use crate::rates;
use crate::regions;
use crate::resolve::find_zone_for_location;
use crate::types::{
    DeliveryType, ParsedShippingZone, WilayaShippingData, WilayaShippingMethod,
};
use crate::zones::ZoneRepository;

/// Bare country code used as the last resolution fallback.
const COUNTRY_CODE: &str = "DZ";

type Zones = Arc<Vec<ParsedShippingZone>>;

/// Outcome of a wilaya shipping query.
///
/// `shipping_data` is `None` both while nothing is selected and when the
/// selected wilaya has no resolvable shipping data; only `error` marks a
/// transient failure. The two never overlap: an errored query carries no
/// data, and a "no data" outcome carries no error.
#[derive(Debug, Clone, Serialize)]
pub struct WilayaShippingStatus {
    pub shipping_data: Option<WilayaShippingData>,
    pub loading: bool,
    pub error: Option<String>,
}

impl WilayaShippingStatus {
    fn idle() -> Self {
        Self {
            shipping_data: None,
            loading: false,
            error: None,
        }
    }
}

struct CachedWilaya {
    /// The zone list this entry was derived from; compared by pointer.
    source: Zones,
    data: WilayaShippingData,
}

/// Shipping query facade with a per-wilaya result memo.
pub struct WilayaShipping {
    repo: Arc<ZoneRepository>,
    cache: Mutex<HashMap<String, CachedWilaya>>,
}

impl WilayaShipping {
    #[must_use]
    pub fn new(repo: Arc<ZoneRepository>) -> Self {
        Self {
            repo,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves shipping data for a wilaya, fetching zones when needed.
    ///
    /// Never fails: fetch errors come back in
    /// [`WilayaShippingStatus::error`], and a wilaya with no mapped code or
    /// no matching zone is a valid no-data outcome.
    pub async fn resolve(&self, wilaya: Option<&str>) -> WilayaShippingStatus {
        let Some(wilaya) = wilaya else {
            return WilayaShippingStatus::idle();
        };
        match self.repo.zones().await {
            Ok(zones) => WilayaShippingStatus {
                shipping_data: self.data_for(wilaya, &zones),
                loading: false,
                error: None,
            },
            Err(err) => WilayaShippingStatus {
                shipping_data: None,
                loading: false,
                error: Some(err.to_string()),
            },
        }
    }

    /// Non-blocking variant for render loops: answers from the warm cache
    /// only. `loading` is `true` while a fetch is in flight with no usable
    /// data yet.
    #[must_use]
    pub fn peek(&self, wilaya: Option<&str>) -> WilayaShippingStatus {
        let Some(wilaya) = wilaya else {
            return WilayaShippingStatus::idle();
        };
        match self.repo.snapshot() {
            Some(zones) => WilayaShippingStatus {
                shipping_data: self.data_for(wilaya, &zones),
                loading: false,
                error: None,
            },
            None => WilayaShippingStatus {
                shipping_data: None,
                loading: self.repo.is_fetching(),
                error: None,
            },
        }
    }

    /// Shipping price for a wilaya and delivery method. Falls back to the
    /// static rate grid when no dynamic data resolves.
    pub async fn price_for(&self, wilaya: &str, method: DeliveryType) -> f64 {
        match self.resolve(Some(wilaya)).await.shipping_data {
            Some(data) => match method {
                DeliveryType::Domicile => data.domicile_price,
                DeliveryType::Stopdesk => data.stopdesk_price,
                DeliveryType::Other => data.cheapest_method.map_or(0.0, |m| m.cost),
            },
            None => rates::static_price(wilaya, method),
        }
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<String, CachedWilaya>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn data_for(&self, wilaya: &str, zones: &Zones) -> Option<WilayaShippingData> {
        if zones.is_empty() {
            return None;
        }

        {
            let cache = self.cache();
            if let Some(hit) = cache.get(wilaya) {
                // Valid only against the zone list that produced it; a
                // refetch swaps the Arc and naturally invalidates the memo.
                if Arc::ptr_eq(&hit.source, zones) {
                    return Some(hit.data.clone());
                }
            }
        }

        let Some(code) = regions::location_code(wilaya) else {
            tracing::warn!(wilaya, "no location code for wilaya");
            return None;
        };

        tracing::debug!(wilaya, code, "resolving shipping zone");
        let zone = find_zone_for_location(code, zones)
            .or_else(|| find_zone_for_location(COUNTRY_CODE, zones))?;

        let data = map_zone(zone);
        self.cache().insert(
            wilaya.to_owned(),
            CachedWilaya {
                source: Arc::clone(zones),
                data: data.clone(),
            },
        );
        Some(data)
    }
}

/// Classifies a zone's methods and derives the per-type prices and the
/// default (cheapest) selection.
fn map_zone(zone: &ParsedShippingZone) -> WilayaShippingData {
    let methods: Vec<WilayaShippingMethod> = zone
        .methods
        .iter()
        .map(|m| WilayaShippingMethod {
            id: m.id,
            method_id: m.method_id.clone(),
            title: m.title.clone(),
            cost: m.cost,
            description: m.description.clone(),
            is_free: m.is_free,
            min_amount: m.min_amount,
            delivery_type: classify(&m.title, &m.method_id),
        })
        .collect();

    let domicile_price = methods
        .iter()
        .find(|m| m.delivery_type == DeliveryType::Domicile)
        .map_or(0.0, |m| m.cost);
    let stopdesk_price = methods
        .iter()
        .find(|m| m.delivery_type == DeliveryType::Stopdesk)
        .map_or(0.0, |m| m.cost);

    // A free method beats any paid one; otherwise the lowest cost wins,
    // earliest method on ties.
    let cheapest_method = methods.iter().cloned().reduce(|cheapest, current| {
        if current.is_free {
            current
        } else if cheapest.is_free || cheapest.cost <= current.cost {
            cheapest
        } else {
            current
        }
    });

    WilayaShippingData {
        zone_name: zone.name.clone(),
        zone_id: zone.id,
        methods,
        domicile_price,
        stopdesk_price,
        cheapest_method,
    }
}
