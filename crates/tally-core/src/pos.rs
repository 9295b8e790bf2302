//! # Checkout Engine
//!
//! Runs an ordered list of discount rules over a cart, then settles the total.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pos::checkout(&mut cart)                         │
//! │                                                                         │
//! │   rules[0].process(cart)  ─┐                                            │
//! │   rules[1].process(cart)   │  strictly in list order; later rules see   │
//! │   ...                      │  the `discounted` flags of earlier ones    │
//! │   rules[n].process(cart)  ─┘                                            │
//! │            │                                                            │
//! │            ▼                                                            │
//! │   cart.total = Σ (price − discount)   (recomputed, never accumulated)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Run Once Per Cart
//! Checkout is not idempotent. Flags stay set between runs, so a second run
//! skips most items, but [`crate::rules::CompoundRule`] re-opens and
//! re-discounts its double-tagged items and can change the result. The
//! engine does not refuse a second run; it logs a warning and carries on.

use tracing::{debug, info, warn};

use crate::money::Money;
use crate::rules::DiscountRule;
use crate::types::Cart;

/// The checkout engine: an ordered, caller-configured rule list.
#[derive(Debug, Default)]
pub struct Pos {
    rules: Vec<Box<dyn DiscountRule>>,
}

impl Pos {
    /// Creates an engine with no rules (checkout only settles the total).
    pub fn new() -> Self {
        Pos::default()
    }

    /// Creates an engine from rules in execution order.
    pub fn with_rules(rules: Vec<Box<dyn DiscountRule>>) -> Self {
        Pos { rules }
    }

    /// Appends a rule; it runs after every rule added before it.
    pub fn add_rule(&mut self, rule: Box<dyn DiscountRule>) {
        self.rules.push(rule);
    }

    /// Rules in execution order.
    pub fn rules(&self) -> &[Box<dyn DiscountRule>] {
        &self.rules
    }

    /// Runs every rule over `cart` in order and returns the settled total.
    ///
    /// Never fails. The exclusive borrow on `cart` is what keeps other
    /// code from touching it while the rules run.
    pub fn checkout(&self, cart: &mut Cart) -> Money {
        if cart.checkout_runs() > 0 {
            warn!(
                previous_runs = cart.checkout_runs(),
                "cart already checked out; discounts may diverge from the first run"
            );
        }

        for rule in &self.rules {
            let info = rule.info();
            debug!(rule_id = info.id, rule = %info.name, "applying rule");
            rule.process(cart);
        }

        let total = cart.settle();
        info!(
            items = cart.len(),
            rules = self.rules.len(),
            subtotal = %cart.subtotal(),
            discount = %cart.discount_total(),
            total = %total,
            "checkout complete"
        );
        total
    }
}
