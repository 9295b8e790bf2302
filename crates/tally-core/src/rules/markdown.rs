//! Same-product add-on markdown: buy one, get the next unit of the same SKU
//! for a special price.

use tracing::debug;

use super::{markdown_pass, DiscountRule, RuleInfo};
use crate::money::Money;
use crate::types::Cart;

/// Every second unit of the same SKU carrying `target_tag` costs `special_price`.
///
/// ## Pairing
/// ```text
/// cart order:   X1  Y1  X2  X3  Y2  X4
///               └───────┘       │
///               X pair #1       │        X1 + X2 → X2 marked down
///                       └───────┘        Y1 + Y2 → Y2 marked down
///                           └───────┘    X3 + X4 → X4 marked down
/// ```
/// Pairs follow cart order, not price. A leftover odd unit stays at full
/// price and unclaimed, so a later rule can still use it.
///
/// The markdown is `price − special_price` and is not clamped: a special
/// price above the unit price yields a negative discount.
#[derive(Debug, Clone)]
pub struct MarkdownRule {
    info: RuleInfo,
    target_tag: String,
    special_price: Money,
}

impl MarkdownRule {
    pub fn new(id: u32, target_tag: impl Into<String>, special_price: Money) -> Self {
        MarkdownRule {
            info: RuleInfo {
                id,
                name: "Same-item add-on deal".to_string(),
                note: format!("Add {special_price} for one more"),
            },
            target_tag: target_tag.into(),
            special_price,
        }
    }

    pub fn target_tag(&self) -> &str {
        &self.target_tag
    }

    pub fn special_price(&self) -> Money {
        self.special_price
    }
}

impl DiscountRule for MarkdownRule {
    fn info(&self) -> &RuleInfo {
        &self.info
    }

    fn process(&self, cart: &mut Cart) {
        let claimed = markdown_pass(cart, &self.target_tag, self.special_price);
        debug!(
            rule_id = self.info.id,
            tag = %self.target_tag,
            claimed,
            "markdown pass complete"
        );
    }
}
