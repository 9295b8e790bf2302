//! "Any two of a tag, X% off" rule.

use std::cmp::Reverse;

use tracing::debug;

use super::{DiscountRule, RuleInfo};
use crate::types::Cart;

/// Every two undiscounted items carrying `target_tag` get `percent_off`% off.
///
/// Eligible items are sorted by price, most expensive first, then paired
/// consecutively. Each item in a completed pair is discounted from its own
/// price. With an odd count the cheapest item is left over, unclaimed.
///
/// ```text
/// prices:   300  100  250  80   ──sort desc──►  300 250 │ 100 80 │
///                                               pair 1    pair 2
/// ```
#[derive(Debug, Clone)]
pub struct PercentOffRule {
    info: RuleInfo,
    target_tag: String,
    percent_off: u8,
}

impl PercentOffRule {
    /// `percent_off` must already be validated (0..=100), see
    /// [`crate::validation::validate_percent_off`].
    pub fn new(id: u32, target_tag: impl Into<String>, percent_off: u8) -> Self {
        let target_tag = target_tag.into();
        PercentOffRule {
            info: RuleInfo {
                id,
                name: "Buy 2, save".to_string(),
                note: format!("Any 2 #{target_tag} items: {percent_off}% off"),
            },
            target_tag,
            percent_off,
        }
    }

    pub fn target_tag(&self) -> &str {
        &self.target_tag
    }

    pub fn percent_off(&self) -> u8 {
        self.percent_off
    }
}

impl DiscountRule for PercentOffRule {
    fn info(&self) -> &RuleInfo {
        &self.info
    }

    fn process(&self, cart: &mut Cart) {
        let mut eligible =
            cart.positions_where(|item| item.has_tag(&self.target_tag) && !item.is_discounted());
        // Stable: equal prices keep cart order.
        eligible.sort_by_key(|&pos| Reverse(cart.items()[pos].price()));

        let items = cart.items_mut();
        let mut claimed = 0;
        for pair in eligible.chunks_exact(2) {
            for &pos in pair {
                let item = &mut items[pos];
                let discount = item.price().percent_of(self.percent_off);
                item.assign_discount(discount);
                item.claim();
            }
            claimed += 2;
        }

        debug!(
            rule_id = self.info.id,
            tag = %self.target_tag,
            percent_off = self.percent_off,
            claimed,
            "percent-off pass complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::LineItem;

    fn item(id: u32, cents: i64, tags: &[&str]) -> LineItem {
        LineItem::new(id, format!("SKU-{id}"), "item", Money::from_cents(cents), tags.iter().copied())
    }

    fn discounts(cart: &Cart) -> Vec<i64> {
        cart.items().iter().map(|i| i.discount().cents()).collect()
    }

    #[test]
    fn test_pair_discounted_from_own_prices() {
        let mut cart = Cart::from_items(vec![item(1, 30000, &["T"]), item(2, 10000, &["T"])]).unwrap();

        PercentOffRule::new(1, "T", 20).process(&mut cart);

        assert_eq!(discounts(&cart), vec![6000, 2000]);
        assert!(cart.items().iter().all(LineItem::is_discounted));
    }

    #[test]
    fn test_odd_count_leaves_cheapest_untouched() {
        let mut cart = Cart::from_items(vec![
            item(1, 500, &["T"]),
            item(2, 100, &["T"]),
            item(3, 900, &["T"]),
        ])
        .unwrap();

        PercentOffRule::new(1, "T", 10).process(&mut cart);

        assert_eq!(discounts(&cart), vec![50, 0, 90]);
        assert!(!cart.items()[1].is_discounted());
    }

    #[test]
    fn test_two_most_expensive_pair_together() {
        // Sorted: 400(4) 300(1) | 200(3) 100(2)
        let mut cart = Cart::from_items(vec![
            item(1, 300, &["T"]),
            item(2, 100, &["T"]),
            item(3, 200, &["T"]),
            item(4, 400, &["T"]),
            item(5, 50, &["T"]),
        ])
        .unwrap();

        PercentOffRule::new(1, "T", 50).process(&mut cart);

        assert_eq!(discounts(&cart), vec![150, 50, 100, 200, 0]);
        assert!(!cart.items()[4].is_discounted());
    }

    #[test]
    fn test_skips_claimed_and_untagged_items() {
        let mut cart = Cart::from_items(vec![
            item(1, 1000, &["T"]),
            item(2, 1000, &[]),
            item(3, 1000, &["T"]),
            item(4, 1000, &["T"]),
        ])
        .unwrap();
        cart.items_mut()[0].claim();

        PercentOffRule::new(1, "T", 10).process(&mut cart);

        assert_eq!(discounts(&cart), vec![0, 0, 100, 100]);
        assert!(!cart.items()[1].is_discounted());
    }

    #[test]
    fn test_empty_or_single_item_is_noop() {
        let rule = PercentOffRule::new(1, "T", 10);

        let mut empty = Cart::new();
        rule.process(&mut empty);

        let mut single = Cart::from_items(vec![item(1, 1000, &["T"])]).unwrap();
        rule.process(&mut single);
        assert_eq!(discounts(&single), vec![0]);
        assert!(!single.items()[0].is_discounted());
    }

    #[test]
    fn test_note() {
        let rule = PercentOffRule::new(6, "drinks", 12);
        assert_eq!(rule.info().note, "Any 2 #drinks items: 12% off");
        assert_eq!(rule.percent_off(), 12);
    }
}
