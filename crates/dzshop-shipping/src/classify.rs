//! Delivery-type classification for shipping methods.
//!
//! WooCommerce gives methods free-text titles, so classification is a
//! keyword heuristic over the title and the method identifier, in French
//! and Arabic. The rules live in an ordered table: Ecotrack integration
//! identifiers are checked before generic keywords because a title like
//! "Ecotrack pickup express" would otherwise be misread by the keyword pass.

use crate::types::DeliveryType;

/// One classification rule. `method_tokens` match only the method id,
/// `title_tokens` only the title, `either_tokens` match both fields.
struct Rule {
    method_tokens: &'static [&'static str],
    title_tokens: &'static [&'static str],
    either_tokens: &'static [&'static str],
    delivery: DeliveryType,
}

impl Rule {
    fn matches(&self, title: &str, method_id: &str) -> bool {
        self.method_tokens.iter().any(|t| method_id.contains(t))
            || self.title_tokens.iter().any(|t| title.contains(t))
            || self
                .either_tokens
                .iter()
                .any(|t| title.contains(t) || method_id.contains(t))
    }
}

/// Ordered rule table — first match wins.
///
/// The final `flat_rate` rule encodes the assumption that a generic
/// flat-rate method is home delivery; that matches how the shipping backend
/// is configured today but is a policy default, not a platform guarantee.
const RULES: &[Rule] = &[
    Rule {
        method_tokens: &["local_pickup_ecotrack"],
        title_tokens: &["للمكتب"],
        either_tokens: &[],
        delivery: DeliveryType::Stopdesk,
    },
    Rule {
        method_tokens: &["flat_rate_ecotrack"],
        title_tokens: &["للمنزل"],
        either_tokens: &[],
        delivery: DeliveryType::Domicile,
    },
    Rule {
        method_tokens: &[],
        title_tokens: &[],
        either_tokens: &[
            "stop desk",
            "stopdesk",
            "point relais",
            "relais",
            "pickup",
            "collect",
            "local_pickup",
            "مكتب",
        ],
        delivery: DeliveryType::Stopdesk,
    },
    Rule {
        method_tokens: &[],
        title_tokens: &[],
        either_tokens: &[
            "domicile", "home", "door", "porte", "maison", "adresse", "flat_rate", "منزل",
        ],
        delivery: DeliveryType::Domicile,
    },
    Rule {
        method_tokens: &["flat_rate"],
        title_tokens: &[],
        either_tokens: &[],
        delivery: DeliveryType::Domicile,
    },
];

/// Classifies a shipping method from its title and method identifier.
///
/// Case-insensitive, pure, first matching rule wins; anything unrecognized
/// is [`DeliveryType::Other`].
#[must_use]
pub fn classify(title: &str, method_id: &str) -> DeliveryType {
    let title = title.to_lowercase();
    let method_id = method_id.to_lowercase();
    for rule in RULES {
        if rule.matches(&title, &method_id) {
            return rule.delivery;
        }
    }
    DeliveryType::Other
}
