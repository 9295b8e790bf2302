//! # Domain Types
//!
//! The two data types every discount rule works on.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐      │
//! │  │        LineItem          │        │          Cart            │      │
//! │  │  ──────────────────────  │  0..n  │  ──────────────────────  │      │
//! │  │  id          (immutable) │◄───────│  items  (load order)     │      │
//! │  │  sku / name / tags       │        │  total  (derived)        │      │
//! │  │  price       (immutable) │        │  checkout_runs           │      │
//! │  │  discount    (rules)     │        └──────────────────────────┘      │
//! │  │  discounted  (rules)     │                                          │
//! │  └──────────────────────────┘                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership of Mutable State
//! - `discount` / `discounted` are written only through the rule-facing
//!   methods on [`LineItem`] (`assign_discount`, `stack_discount`, `claim`,
//!   `release`). Neither [`Cart`] nor the checkout engine calls them.
//! - `total` is written only by the checkout engine.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Line Item
// =============================================================================

/// One purchased unit in a cart.
///
/// A cart holding three bottles of the same drink holds three `LineItem`s
/// with the same `sku`; there is no quantity field. Pairing rules rely on
/// this: "every second bottle" is a statement about line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    id: u32,
    sku: String,
    name: String,
    price: Money,
    discount: Money,
    tags: BTreeSet<String>,
    discounted: bool,
}

impl LineItem {
    /// Creates an undiscounted line item.
    ///
    /// Inputs are not validated here; `tally-catalog` validates catalog
    /// records before building items.
    pub fn new<I, S>(id: u32, sku: impl Into<String>, name: impl Into<String>, price: Money, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LineItem {
            id,
            sku: sku.into(),
            name: name.into(),
            price,
            discount: Money::zero(),
            tags: tags.into_iter().map(Into::into).collect(),
            discounted: false,
        }
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn sku(&self) -> &str {
        &self.sku
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Original unit price.
    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// Discount assigned by rules so far (zero until a rule claims the item).
    #[inline]
    pub fn discount(&self) -> Money {
        self.discount
    }

    /// `price − discount` at the time of the call.
    #[inline]
    pub fn net_price(&self) -> Money {
        self.price - self.discount
    }

    /// Tags in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Checks whether the item carries `tag`.
    #[inline]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Whether a rule has already claimed this item during the current checkout.
    #[inline]
    pub fn is_discounted(&self) -> bool {
        self.discounted
    }

    /// Renders the tags as `, Tags: #a,#b` for receipts (empty if untagged).
    pub fn tags_label(&self) -> String {
        if self.tags.is_empty() {
            return String::new();
        }
        let joined = self
            .tags
            .iter()
            .map(|t| format!("#{t}"))
            .collect::<Vec<_>>()
            .join(",");
        format!(", Tags: {joined}")
    }

    // =========================================================================
    // Rule-facing mutators
    // =========================================================================

    /// Replaces the discount with `amount`.
    pub fn assign_discount(&mut self, amount: Money) {
        self.discount = amount;
    }

    /// Adds `amount` on top of the current discount.
    pub fn stack_discount(&mut self, amount: Money) {
        self.discount += amount;
    }

    /// Marks the item as claimed by a rule.
    pub fn claim(&mut self) {
        self.discounted = true;
    }

    /// Clears the claim flag. Only rules that re-open a subset they own
    /// (see [`crate::rules::CompoundRule`]) should call this.
    pub fn release(&mut self) {
        self.discounted = false;
    }
}

// =============================================================================
// Cart
// =============================================================================

/// An ordered collection of line items plus the derived total.
///
/// ## Invariants
/// - Item order is load order and is never changed after insertion
/// - Item ids are unique within the cart
/// - `total` is only meaningful after a checkout; it is recomputed from
///   scratch on every run, never accumulated
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    items: Vec<LineItem>,
    total: Money,
    checkout_runs: u32,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Builds a cart from items in the given order.
    ///
    /// ## Errors
    /// [`CoreError::DuplicateItemId`] if two items share an id.
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> CoreResult<Self> {
        let mut cart = Cart::new();
        for item in items {
            cart.push(item)?;
        }
        Ok(cart)
    }

    /// Appends an item at the end of the cart.
    pub fn push(&mut self, item: LineItem) -> CoreResult<()> {
        if self.items.iter().any(|existing| existing.id == item.id) {
            return Err(CoreError::DuplicateItemId(item.id));
        }
        self.items.push(item);
        Ok(())
    }

    /// Items in load order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Mutable access for discount rules.
    ///
    /// A slice, not the Vec: rules may mutate items but cannot add, remove
    /// or reorder them.
    pub fn items_mut(&mut self) -> &mut [LineItem] {
        &mut self.items
    }

    /// Looks up an item by id.
    pub fn get(&self, id: u32) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total as of the last checkout.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Sum of original prices.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::price).sum()
    }

    /// Sum of all discounts currently assigned.
    pub fn discount_total(&self) -> Money {
        self.items.iter().map(LineItem::discount).sum()
    }

    /// How many times this cart has been checked out.
    pub fn checkout_runs(&self) -> u32 {
        self.checkout_runs
    }

    /// Positions (in cart order) of the items matching `predicate`.
    ///
    /// Rules work on positions rather than references so that they can
    /// select with a shared borrow and then mutate through `items_mut`.
    pub fn positions_where<P>(&self, predicate: P) -> Vec<usize>
    where
        P: Fn(&LineItem) -> bool,
    {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| predicate(item))
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Recomputes `total = Σ (price − discount)` and bumps the run counter.
    pub(crate) fn settle(&mut self) -> Money {
        self.total = self.items.iter().map(LineItem::net_price).sum();
        self.checkout_runs += 1;
        self.total
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, sku: &str, cents: i64, tags: &[&str]) -> LineItem {
        LineItem::new(id, sku, format!("Product {sku}"), Money::from_cents(cents), tags.iter().copied())
    }

    #[test]
    fn test_new_line_item_is_undiscounted() {
        let it = item(1, "TEA", 2500, &["drinks", "drinks"]);
        assert_eq!(it.discount(), Money::zero());
        assert!(!it.is_discounted());
        assert_eq!(it.tags().count(), 1);
        assert_eq!(it.net_price().cents(), 2500);
    }

    #[test]
    fn test_rule_facing_mutators() {
        let mut it = item(1, "TEA", 2500, &[]);
        it.assign_discount(Money::from_cents(500));
        it.stack_discount(Money::from_cents(200));
        assert_eq!(it.discount().cents(), 700);
        assert_eq!(it.net_price().cents(), 1800);

        it.claim();
        assert!(it.is_discounted());
        it.release();
        assert!(!it.is_discounted());
    }

    #[test]
    fn test_tags_label() {
        assert_eq!(item(1, "A", 100, &[]).tags_label(), "");
        assert_eq!(
            item(1, "A", 100, &["b", "a"]).tags_label(),
            ", Tags: #a,#b"
        );
    }

    #[test]
    fn test_cart_rejects_duplicate_ids() {
        let mut cart = Cart::new();
        cart.push(item(1, "A", 100, &[])).unwrap();
        let err = cart.push(item(1, "B", 200, &[])).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateItemId(1)));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_cart_preserves_order_and_sums() {
        let cart = Cart::from_items(vec![
            item(3, "C", 300, &["x"]),
            item(1, "A", 100, &[]),
            item(2, "B", 200, &["x"]),
        ])
        .unwrap();

        let ids: Vec<u32> = cart.items().iter().map(LineItem::id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(cart.subtotal().cents(), 600);
        assert_eq!(cart.discount_total(), Money::zero());
        assert_eq!(cart.positions_where(|i| i.has_tag("x")), vec![0, 2]);
        assert_eq!(cart.get(2).map(LineItem::sku), Some("B"));
        assert!(cart.get(9).is_none());
    }

    #[test]
    fn test_settle_recomputes_instead_of_accumulating() {
        let mut cart = Cart::from_items(vec![item(1, "A", 1000, &[])]).unwrap();
        cart.items_mut()[0].assign_discount(Money::from_cents(300));

        assert_eq!(cart.settle().cents(), 700);
        assert_eq!(cart.settle().cents(), 700);
        assert_eq!(cart.checkout_runs(), 2);
    }

    #[test]
    fn test_line_item_serializes_for_reports() {
        let json = serde_json::to_value(item(1, "A", 100, &["x"])).unwrap();
        assert_eq!(json["sku"], "A");
        assert_eq!(json["price"], 100);
        assert_eq!(json["discounted"], false);
    }
}
