//! # Discount Rules
//!
//! The rule contract and the three built-in strategies.
//!
//! ## How Rules Cooperate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Checkout, Three Rules                            │
//! │                                                                         │
//! │  items:  [A] [B] [C] [D] [E]          discounted flags: all false      │
//! │             │                                                           │
//! │             ▼                                                           │
//! │  rule 1 ──► claims B, C               flags: . x x . .                 │
//! │             │                                                           │
//! │             ▼                                                           │
//! │  rule 2 ──► skips B, C; claims D, E   flags: . x x x x                 │
//! │             │                                                           │
//! │             ▼                                                           │
//! │  rule 3 ──► only A is still eligible                                   │
//! │                                                                         │
//! │  A rule never clears a flag it did not set in the same pass, with one  │
//! │  exception: CompoundRule re-opens its own double-tagged items.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Strategies
//! - [`MarkdownRule`] - every 2nd unit of the same SKU costs a special price
//! - [`PercentOffRule`] - every 2 tagged items get a percentage off
//! - [`CompoundRule`] - markdown, then a percentage stacked on the cheaper half

mod compound;
mod markdown;
mod percent_off;

pub use compound::CompoundRule;
pub use markdown::MarkdownRule;
pub use percent_off::PercentOffRule;

use std::fmt;

use crate::money::Money;
use crate::types::Cart;

// =============================================================================
// Rule Contract
// =============================================================================

/// Descriptive metadata shared by every rule. Has no effect on behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInfo {
    pub id: u32,
    pub name: String,
    pub note: String,
}

/// A self-contained discount algorithm with fixed parameters.
///
/// ## Contract
/// - `process` mutates `discount` / `discounted` on the cart's items in
///   place and nothing else. It cannot add, remove or reorder items
///   ([`Cart::items_mut`] hands out a slice).
/// - Items already `discounted` when `process` starts belong to an earlier
///   rule and must be skipped.
/// - `process` never fails; an empty cart or an empty eligible set is a
///   no-op.
///
/// Rules hold no per-checkout state, so one instance can be reused across
/// any number of carts.
pub trait DiscountRule: fmt::Debug {
    /// Id, name and note for receipts and logs.
    fn info(&self) -> &RuleInfo;

    /// Applies the rule to `cart`.
    fn process(&self, cart: &mut Cart);
}

// =============================================================================
// Shared Passes
// =============================================================================

/// Same-SKU markdown pass shared by [`MarkdownRule`] and [`CompoundRule`].
///
/// Among undiscounted items carrying `tag`, groups by SKU (groups in order of
/// first appearance, items in cart order). In each group every completed
/// pair gives its second item `discount = price − special_price` and claims
/// both items. Returns the number of items claimed.
pub(crate) fn markdown_pass(cart: &mut Cart, tag: &str, special_price: Money) -> usize {
    let eligible = cart.positions_where(|item| item.has_tag(tag) && !item.is_discounted());

    let mut skus: Vec<&str> = Vec::new();
    for &pos in &eligible {
        let sku = cart.items()[pos].sku();
        if !skus.contains(&sku) {
            skus.push(sku);
        }
    }

    // Pair positions per SKU group; buffer holds at most one waiting item.
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for sku in &skus {
        let mut waiting: Option<usize> = None;
        for &pos in eligible.iter().filter(|&&pos| cart.items()[pos].sku() == *sku) {
            match waiting.take() {
                Some(first) => pairs.push((first, pos)),
                None => waiting = Some(pos),
            }
        }
    }

    let items = cart.items_mut();
    for &(first, second) in &pairs {
        let markdown = items[second].price() - special_price;
        items[second].assign_discount(markdown);
        items[first].claim();
        items[second].claim();
    }

    pairs.len() * 2
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineItem;

    fn item(id: u32, sku: &str, cents: i64, tags: &[&str]) -> LineItem {
        LineItem::new(id, sku, sku, Money::from_cents(cents), tags.iter().copied())
    }

    #[test]
    fn test_markdown_pass_groups_by_first_appearance() {
        let mut cart = Cart::from_items(vec![
            item(1, "X", 1000, &["t"]),
            item(2, "Y", 500, &["t"]),
            item(3, "X", 1000, &["t"]),
            item(4, "Y", 500, &["t"]),
            item(5, "Y", 500, &["t"]),
        ])
        .unwrap();

        let claimed = markdown_pass(&mut cart, "t", Money::from_cents(100));
        assert_eq!(claimed, 4);

        let discounts: Vec<i64> = cart.items().iter().map(|i| i.discount().cents()).collect();
        assert_eq!(discounts, vec![0, 0, 900, 400, 0]);
        let flags: Vec<bool> = cart.items().iter().map(LineItem::is_discounted).collect();
        assert_eq!(flags, vec![true, true, true, true, false]);
    }

    #[test]
    fn test_markdown_pass_ignores_untagged_items_of_same_sku() {
        let mut cart = Cart::from_items(vec![
            item(1, "X", 1000, &["t"]),
            item(2, "X", 1000, &[]),
        ])
        .unwrap();

        assert_eq!(markdown_pass(&mut cart, "t", Money::from_cents(100)), 0);
        assert!(cart.items().iter().all(|i| !i.is_discounted()));
    }
}
