//! Static fallback shipping rates.
//!
//! The tariff grid used before the store switched to dynamic WooCommerce
//! zones, kept as the fallback when no zone resolves for a wilaya. Prices
//! are in DZD, grouped roughly by distance from Algiers.

use crate::types::DeliveryType;

/// Home/stop-desk price pair for one wilaya, in DZD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShippingRate {
    pub domicile: f64,
    pub stopdesk: f64,
}

/// Rate applied to any wilaya missing from [`STATIC_RATES`].
pub const DEFAULT_RATE: ShippingRate = ShippingRate {
    domicile: 800.0,
    stopdesk: 650.0,
};

const STATIC_RATES: &[(&str, ShippingRate)] = &[
    // Alger et environs
    ("Alger", ShippingRate { domicile: 500.0, stopdesk: 350.0 }),
    ("Blida", ShippingRate { domicile: 550.0, stopdesk: 400.0 }),
    ("Boumerdès", ShippingRate { domicile: 550.0, stopdesk: 400.0 }),
    ("Tipaza", ShippingRate { domicile: 550.0, stopdesk: 400.0 }),
    // Centre nord
    ("Tizi Ouzou", ShippingRate { domicile: 600.0, stopdesk: 450.0 }),
    ("Béjaïa", ShippingRate { domicile: 650.0, stopdesk: 500.0 }),
    ("Bouira", ShippingRate { domicile: 600.0, stopdesk: 450.0 }),
    ("Médéa", ShippingRate { domicile: 600.0, stopdesk: 450.0 }),
    ("Chlef", ShippingRate { domicile: 650.0, stopdesk: 500.0 }),
    ("Aïn Defla", ShippingRate { domicile: 600.0, stopdesk: 450.0 }),
    // Est
    ("Constantine", ShippingRate { domicile: 700.0, stopdesk: 550.0 }),
    ("Annaba", ShippingRate { domicile: 750.0, stopdesk: 600.0 }),
    ("Sétif", ShippingRate { domicile: 700.0, stopdesk: 550.0 }),
    ("Batna", ShippingRate { domicile: 750.0, stopdesk: 600.0 }),
    ("Skikda", ShippingRate { domicile: 750.0, stopdesk: 600.0 }),
    ("Jijel", ShippingRate { domicile: 700.0, stopdesk: 550.0 }),
    ("Bordj Bou Arreridj", ShippingRate { domicile: 700.0, stopdesk: 550.0 }),
    ("Mila", ShippingRate { domicile: 700.0, stopdesk: 550.0 }),
    ("M'Sila", ShippingRate { domicile: 750.0, stopdesk: 600.0 }),
    ("Guelma", ShippingRate { domicile: 750.0, stopdesk: 600.0 }),
    ("Oum El Bouaghi", ShippingRate { domicile: 750.0, stopdesk: 600.0 }),
    ("El Tarf", ShippingRate { domicile: 800.0, stopdesk: 650.0 }),
    ("Souk Ahras", ShippingRate { domicile: 800.0, stopdesk: 650.0 }),
    ("Tébessa", ShippingRate { domicile: 850.0, stopdesk: 700.0 }),
    ("Khenchela", ShippingRate { domicile: 800.0, stopdesk: 650.0 }),
    // Ouest
    ("Oran", ShippingRate { domicile: 700.0, stopdesk: 550.0 }),
    ("Tlemcen", ShippingRate { domicile: 750.0, stopdesk: 600.0 }),
    ("Sidi Bel Abbès", ShippingRate { domicile: 700.0, stopdesk: 550.0 }),
    ("Mostaganem", ShippingRate { domicile: 700.0, stopdesk: 550.0 }),
    ("Mascara", ShippingRate { domicile: 700.0, stopdesk: 550.0 }),
    ("Relizane", ShippingRate { domicile: 700.0, stopdesk: 550.0 }),
    ("Tiaret", ShippingRate { domicile: 750.0, stopdesk: 600.0 }),
    ("Saïda", ShippingRate { domicile: 750.0, stopdesk: 600.0 }),
    ("Aïn Témouchent", ShippingRate { domicile: 700.0, stopdesk: 550.0 }),
    ("Tissemsilt", ShippingRate { domicile: 750.0, stopdesk: 600.0 }),
    ("Naâma", ShippingRate { domicile: 900.0, stopdesk: 750.0 }),
    // Hauts plateaux
    ("Djelfa", ShippingRate { domicile: 800.0, stopdesk: 650.0 }),
    ("Laghouat", ShippingRate { domicile: 850.0, stopdesk: 700.0 }),
    ("El Bayadh", ShippingRate { domicile: 900.0, stopdesk: 750.0 }),
    ("Biskra", ShippingRate { domicile: 850.0, stopdesk: 700.0 }),
    ("El Oued", ShippingRate { domicile: 900.0, stopdesk: 750.0 }),
    // Sud
    ("Ghardaïa", ShippingRate { domicile: 1000.0, stopdesk: 850.0 }),
    ("Ouargla", ShippingRate { domicile: 1000.0, stopdesk: 850.0 }),
    ("Béchar", ShippingRate { domicile: 1100.0, stopdesk: 950.0 }),
    ("Adrar", ShippingRate { domicile: 1200.0, stopdesk: 1050.0 }),
    ("Tindouf", ShippingRate { domicile: 1300.0, stopdesk: 1150.0 }),
    ("Illizi", ShippingRate { domicile: 1300.0, stopdesk: 1150.0 }),
    ("Tamanrasset", ShippingRate { domicile: 1400.0, stopdesk: 1250.0 }),
    // Wilayas créées en 2019
    ("Timimoun", ShippingRate { domicile: 1200.0, stopdesk: 1050.0 }),
    ("Bordj Badji Mokhtar", ShippingRate { domicile: 1400.0, stopdesk: 1250.0 }),
    ("Ouled Djellal", ShippingRate { domicile: 900.0, stopdesk: 750.0 }),
    ("Béni Abbès", ShippingRate { domicile: 1100.0, stopdesk: 950.0 }),
    ("In Salah", ShippingRate { domicile: 1300.0, stopdesk: 1150.0 }),
    ("In Guezzam", ShippingRate { domicile: 1400.0, stopdesk: 1250.0 }),
    ("Touggourt", ShippingRate { domicile: 950.0, stopdesk: 800.0 }),
    ("Djanet", ShippingRate { domicile: 1400.0, stopdesk: 1250.0 }),
    ("El M'Ghair", ShippingRate { domicile: 900.0, stopdesk: 750.0 }),
    ("El Meniaa", ShippingRate { domicile: 1000.0, stopdesk: 850.0 }),
];

/// Storefront-wide shipping behavior knobs.
#[derive(Debug, Clone, Copy)]
pub struct ShippingSettings {
    /// Display and charge shipping at all.
    pub enabled: bool,
    /// Subtotal above which shipping is free; `0` disables the rule.
    pub free_shipping_threshold: f64,
    /// Method pre-selected in the checkout form.
    pub default_method: DeliveryType,
}

pub const SETTINGS: ShippingSettings = ShippingSettings {
    enabled: true,
    free_shipping_threshold: 0.0,
    default_method: DeliveryType::Stopdesk,
};

/// Returns the static rate pair for a wilaya, falling back to
/// [`DEFAULT_RATE`] for names not in the grid.
#[must_use]
pub fn rates_for(wilaya: &str) -> ShippingRate {
    STATIC_RATES
        .iter()
        .find(|(name, _)| *name == wilaya)
        .map_or(DEFAULT_RATE, |(_, rate)| *rate)
}

/// Whether a wilaya has its own line in the static grid.
#[must_use]
pub fn has_custom_rates(wilaya: &str) -> bool {
    STATIC_RATES.iter().any(|(name, _)| *name == wilaya)
}

/// Static price for a wilaya and delivery method. An unclassified method
/// falls back to the configured default method's price.
#[must_use]
pub fn static_price(wilaya: &str, method: DeliveryType) -> f64 {
    let rates = rates_for(wilaya);
    match method {
        DeliveryType::Domicile => rates.domicile,
        DeliveryType::Stopdesk => rates.stopdesk,
        DeliveryType::Other => match SETTINGS.default_method {
            DeliveryType::Domicile => rates.domicile,
            _ => rates.stopdesk,
        },
    }
}

/// Whether an order subtotal qualifies for free shipping.
#[must_use]
pub fn is_free_shipping(subtotal: f64) -> bool {
    SETTINGS.free_shipping_threshold > 0.0 && subtotal >= SETTINGS.free_shipping_threshold
}
