//! Compound rule: a same-SKU markdown and a percent-off deal in one pass,
//! stacking both on items that carry both tags.

use tracing::debug;

use super::{markdown_pass, DiscountRule, RuleInfo};
use crate::money::Money;
use crate::types::Cart;

/// Markdown on `amount_tag`, then `percent_off`% on the cheaper half of
/// `percent_tag` items, with double-tagged items eligible for both.
///
/// ## Phases
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. snapshot   undiscounted items with BOTH tags                        │
/// │                (none → rule is a no-op, stop here)                      │
/// │  2. markdown   same-SKU pairs over amount_tag items                     │
/// │                second of each pair: discount = price − amount_value     │
/// │  3. re-open    clear `discounted` on every snapshot item                │
/// │  4. percent    undiscounted percent_tag items, cheapest net first;      │
/// │                the first floor(n/2) get discount += net × percent_off   │
/// │                and ALL n are claimed                                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
/// Phase 3 is unconditional: a snapshot item that phase 2 left alone is
/// re-opened too (it was open anyway). Amount-only items claimed in phase 2
/// stay claimed, so they never get the percentage.
#[derive(Debug, Clone)]
pub struct CompoundRule {
    info: RuleInfo,
    amount_tag: String,
    amount_value: Money,
    percent_tag: String,
    percent_off: u8,
}

impl CompoundRule {
    /// `percent_off` must already be validated (0..=100).
    pub fn new(
        id: u32,
        amount_tag: impl Into<String>,
        amount_value: Money,
        percent_tag: impl Into<String>,
        percent_off: u8,
    ) -> Self {
        let amount_tag = amount_tag.into();
        let percent_tag = percent_tag.into();
        CompoundRule {
            info: RuleInfo {
                id,
                name: "Add-on deal + buy 2, save".to_string(),
                note: format!(
                    "Any 2 #{percent_tag} items: {percent_off}% off, Add {amount_value} for one more"
                ),
            },
            amount_tag,
            amount_value,
            percent_tag,
            percent_off,
        }
    }

    pub fn amount_tag(&self) -> &str {
        &self.amount_tag
    }

    pub fn amount_value(&self) -> Money {
        self.amount_value
    }

    pub fn percent_tag(&self) -> &str {
        &self.percent_tag
    }

    pub fn percent_off(&self) -> u8 {
        self.percent_off
    }
}

impl DiscountRule for CompoundRule {
    fn info(&self) -> &RuleInfo {
        &self.info
    }

    fn process(&self, cart: &mut Cart) {
        // Phase 1
        let double_eligible = cart.positions_where(|item| {
            item.has_tag(&self.amount_tag) && item.has_tag(&self.percent_tag) && !item.is_discounted()
        });
        if double_eligible.is_empty() {
            debug!(rule_id = self.info.id, "no double-tagged items, skipping");
            return;
        }

        // Phase 2
        let marked_down = markdown_pass(cart, &self.amount_tag, self.amount_value);

        // Phase 3
        let items = cart.items_mut();
        for &pos in &double_eligible {
            items[pos].release();
        }

        // Phase 4
        let mut eligible =
            cart.positions_where(|item| item.has_tag(&self.percent_tag) && !item.is_discounted());
        eligible.sort_by_key(|&pos| cart.items()[pos].net_price());
        let percent_count = eligible.len() / 2;

        let items = cart.items_mut();
        for (rank, &pos) in eligible.iter().enumerate() {
            let item = &mut items[pos];
            if rank < percent_count {
                let extra = item.net_price().percent_of(self.percent_off);
                item.stack_discount(extra);
            }
            item.claim();
        }

        debug!(
            rule_id = self.info.id,
            double_eligible = double_eligible.len(),
            marked_down,
            percent_applied = percent_count,
            claimed = eligible.len(),
            "compound pass complete"
        );
    }
}
