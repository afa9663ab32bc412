//! Zone lookup for a customer location code.

use crate::types::ParsedShippingZone;

/// The id WooCommerce reserves for the "rest of the world" catch-all zone.
const CATCH_ALL_ZONE_ID: i64 = 0;

/// Finds the best-matching zone for a location code such as `"DZ:DZ-16"`.
///
/// Zone location rules can be declared at postcode, state, country, or
/// continent granularity while the storefront always supplies a
/// state-level code, so the match widens in three tiers:
///
/// 1. a zone listing the code verbatim,
/// 2. a zone listing the bare country code (the part before `':'`),
/// 3. the catch-all zone (id 0) if one exists.
///
/// Returns `None` when all three tiers miss.
#[must_use]
pub fn find_zone_for_location<'a>(
    code: &str,
    zones: &'a [ParsedShippingZone],
) -> Option<&'a ParsedShippingZone> {
    if let Some(exact) = zones.iter().find(|z| z.locations.iter().any(|l| l == code)) {
        return Some(exact);
    }

    let country = code.split(':').next().unwrap_or(code);
    if let Some(by_country) = zones
        .iter()
        .find(|z| z.locations.iter().any(|l| l == country))
    {
        return Some(by_country);
    }

    zones.iter().find(|z| z.id == CATCH_ALL_ZONE_ID)
}
