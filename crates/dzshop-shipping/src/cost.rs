//! Parsing of WooCommerce free-form shipping cost strings.

/// Extracts the flat base rate from a WooCommerce cost expression.
///
/// WooCommerce allows cost values to be arithmetic expressions referencing
/// cart quantity (e.g. `"10.00 * [qty]"`); the storefront only needs the
/// flat rate, so everything after the leading numeric term is discarded
/// rather than evaluated. `"1.2.3"` parses to `1.2`, matching the reference
/// platform's float-prefix semantics. Missing, empty, or non-numeric input
/// degrades to `0.0` — never an error.
#[must_use]
pub fn parse_cost(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else { return 0.0 };
    let cleaned = raw.trim();

    // Longest leading run of digits and dots; the run is pure ASCII so byte
    // slicing below stays on char boundaries.
    let run_len = cleaned
        .bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b'.')
        .count();
    if run_len == 0 {
        return 0.0;
    }

    // Longest prefix of the run that parses as a float ("1.2.3" → 1.2).
    let mut prefix = &cleaned[..run_len];
    while !prefix.is_empty() {
        if let Ok(value) = prefix.parse::<f64>() {
            return value;
        }
        prefix = &prefix[..prefix.len() - 1];
    }
    0.0
}
