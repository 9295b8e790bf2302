//! End-to-end checkout scenarios over the public API.

use tally_core::{Cart, CompoundRule, DiscountRule, LineItem, MarkdownRule, Money, PercentOffRule, Pos};

const ADD_ON: &str = "add-on-deal";
const DRINKS: &str = "best-selling-drinks";

fn item(id: u32, sku: &str, cents: i64, tags: &[&str]) -> LineItem {
    LineItem::new(id, sku, format!("{sku} #{id}"), Money::from_cents(cents), tags.iter().copied())
}

/// The rule list the CLI ships with when no config overrides it.
fn default_pos() -> Pos {
    let rules: Vec<Box<dyn DiscountRule>> = vec![
        Box::new(CompoundRule::new(1, ADD_ON, Money::from_major(10), DRINKS, 12)),
        Box::new(MarkdownRule::new(2, ADD_ON, Money::from_major(10))),
        Box::new(PercentOffRule::new(3, DRINKS, 12)),
    ];
    Pos::with_rules(rules)
}

fn discounts(cart: &Cart) -> Vec<i64> {
    cart.items().iter().map(|i| i.discount().cents()).collect()
}

#[test]
fn markdown_pair_scenario() {
    let mut cart = Cart::from_items(vec![
        item(1, "X", 10000, &["T"]),
        item(2, "X", 10000, &["T"]),
    ])
    .unwrap();
    let pos = Pos::with_rules(vec![Box::new(MarkdownRule::new(1, "T", Money::from_major(10)))]);

    let total = pos.checkout(&mut cart);

    assert_eq!(discounts(&cart), vec![0, 9000]);
    assert_eq!(total, Money::from_major(110));
    assert_eq!(cart.total(), total);
}

#[test]
fn percent_off_pair_scenario() {
    let mut cart = Cart::from_items(vec![
        item(1, "A", 30000, &["T"]),
        item(2, "B", 10000, &["T"]),
    ])
    .unwrap();
    let pos = Pos::with_rules(vec![Box::new(PercentOffRule::new(1, "T", 20))]);

    let total = pos.checkout(&mut cart);

    assert_eq!(discounts(&cart), vec![6000, 2000]);
    assert_eq!(total, Money::from_major(320));
}

#[test]
fn default_rules_without_double_tagged_items() {
    // Compound is a no-op, so markdown and percent-off behave on their own.
    let mut cart = Cart::from_items(vec![
        item(1, "LATTE", 6500, &[ADD_ON]),
        item(2, "LATTE", 6500, &[ADD_ON]),
        item(3, "LATTE", 6500, &[ADD_ON]),
        item(4, "TEA", 2500, &[DRINKS]),
        item(5, "COLA", 3000, &[DRINKS]),
        item(6, "WATER", 1500, &[DRINKS]),
        item(7, "BAG", 500, &[]),
    ])
    .unwrap();

    let total = default_pos().checkout(&mut cart);

    // LATTE #2 → $10; COLA + TEA pair at 12%; WATER left over; BAG untouched.
    assert_eq!(discounts(&cart), vec![0, 5500, 0, 300, 360, 0, 0]);
    assert_eq!(total.cents(), cart.subtotal().cents() - 5500 - 300 - 360);
    assert!(!cart.items()[2].is_discounted());
    assert!(!cart.items()[5].is_discounted());
}

#[test]
fn default_rules_with_double_tagged_items() {
    let mut cart = Cart::from_items(vec![
        item(1, "SODA", 5000, &[ADD_ON, DRINKS]),
        item(2, "SODA", 5000, &[ADD_ON, DRINKS]),
        item(3, "JUICE", 4000, &[DRINKS]),
        item(4, "JUICE", 4000, &[DRINKS]),
        item(5, "MUG", 9000, &[ADD_ON]),
        item(6, "MUG", 9000, &[ADD_ON]),
    ])
    .unwrap();

    let total = default_pos().checkout(&mut cart);

    // Compound phase 2: SODA #2 → $10 (4000), MUG #6 → $10 (8000).
    // Phase 4 over drinks by net: SODA#2 $10, JUICE $40, JUICE $40, SODA#1 $50
    //   → cheapest two: SODA#2 +$1.20, JUICE#3 +$4.80; all four claimed.
    // Markdown and percent-off rules then find nothing left.
    assert_eq!(discounts(&cart), vec![0, 4120, 480, 0, 0, 8000]);
    assert!(cart.items().iter().all(LineItem::is_discounted));
    assert_eq!(total.cents(), 36000 - 4120 - 480 - 8000);
}

#[test]
fn second_checkout_is_tolerated_but_not_idempotent() {
    let mut cart = Cart::from_items(vec![
        item(1, "SODA", 5000, &[ADD_ON, DRINKS]),
        item(2, "SODA", 5000, &[ADD_ON]),
        item(3, "JUICE", 9000, &[DRINKS]),
    ])
    .unwrap();
    let pos = default_pos();

    // SODA#2 marked down to $10; SODA#1 re-opened and takes 12% of $50.
    let first = pos.checkout(&mut cart);
    assert_eq!(discounts(&cart), vec![600, 4000, 0]);
    assert_eq!(first.cents(), 19000 - 4600);

    // Everything is claimed now, so a plain re-run changes nothing.
    let second = pos.checkout(&mut cart);
    assert_eq!(second, first);

    // Once claims are cleared, the stacked percentage compounds on the
    // already-discounted net price and the total drifts.
    for it in cart.items_mut() {
        it.release();
    }
    let third = pos.checkout(&mut cart);
    assert_eq!(discounts(&cart), vec![600 + 528, 4000, 0]);
    assert_ne!(third, first);
    assert_eq!(cart.checkout_runs(), 3);
}

#[test]
fn engine_is_reusable_across_carts() {
    let pos = default_pos();
    let build = || {
        Cart::from_items(vec![
            item(1, "TEA", 2500, &[DRINKS]),
            item(2, "TEA", 2500, &[DRINKS]),
        ])
        .unwrap()
    };

    let mut a = build();
    let mut b = build();
    assert_eq!(pos.checkout(&mut a), pos.checkout(&mut b));
    assert_eq!(a.checkout_runs(), 1);
    assert_eq!(b.checkout_runs(), 1);
}
