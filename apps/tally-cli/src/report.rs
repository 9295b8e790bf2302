//! # Receipt Rendering
//!
//! Read-only view over a checked-out cart.
//!
//! ## Layout
//! ```text
//! Receipt 6f1c…-…   2026-10-19 14:03:11 UTC
//!
//! - 01, [LATTE-L]   $65.00, Latte (L) discount $0.00, Tags: #add-on-deal
//! - 02, [LATTE-L]   $65.00, Latte (L) discount $55.00, Tags: #add-on-deal
//!
//! Rules:
//! - #1 Add-on deal + buy 2, save: Any 2 #best-selling-drinks items: 12% off, ...
//!
//! Subtotal: $130.00
//! Discount: $55.00
//! Total: $75.00
//! ```

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use tally_core::{Cart, DiscountRule};
use uuid::Uuid;

/// Header data for one printed receipt.
#[derive(Debug, Clone)]
pub struct Receipt {
    id: Uuid,
    printed_at: DateTime<Utc>,
}

impl Receipt {
    /// A fresh receipt stamped now.
    pub fn new() -> Self {
        Receipt {
            id: Uuid::new_v4(),
            printed_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn printed_at(&self) -> DateTime<Utc> {
        self.printed_at
    }

    /// Writes the receipt for `cart`.
    ///
    /// `rules` feeds the legend only; the cart must already be checked out.
    pub fn write_to<W: Write>(
        &self,
        out: &mut W,
        cart: &Cart,
        rules: &[Box<dyn DiscountRule>],
        show_tags: bool,
    ) -> io::Result<()> {
        writeln!(
            out,
            "Receipt {}   {}",
            self.id,
            self.printed_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(out)?;

        for item in cart.items() {
            let tags = if show_tags {
                item.tags_label()
            } else {
                String::new()
            };
            writeln!(
                out,
                "- {:02}, [{}] {:>8}, {} discount {}{}",
                item.id(),
                item.sku(),
                item.price(),
                item.name(),
                item.discount(),
                tags
            )?;
        }

        if !rules.is_empty() {
            writeln!(out)?;
            writeln!(out, "Rules:")?;
            for rule in rules {
                let info = rule.info();
                writeln!(out, "- #{} {}: {}", info.id, info.name, info.note)?;
            }
        }

        writeln!(out)?;
        writeln!(out, "Subtotal: {}", cart.subtotal())?;
        writeln!(out, "Discount: {}", cart.discount_total())?;
        writeln!(out, "Total: {}", cart.total())?;
        Ok(())
    }
}

impl Default for Receipt {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{LineItem, MarkdownRule, Money, Pos};

    fn render(cart: &Cart, rules: &[Box<dyn DiscountRule>], show_tags: bool) -> String {
        let mut buf = Vec::new();
        Receipt::new()
            .write_to(&mut buf, cart, rules, show_tags)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn checked_out() -> (Cart, Pos) {
        let mut cart = Cart::from_items(vec![
            LineItem::new(1, "LATTE-L", "Latte (L)", Money::from_cents(6500), ["add-on-deal"]),
            LineItem::new(2, "LATTE-L", "Latte (L)", Money::from_cents(6500), ["add-on-deal"]),
            LineItem::new(3, "BAG", "Paper bag", Money::from_cents(50), Vec::<String>::new()),
        ])
        .unwrap();
        let pos = Pos::with_rules(vec![Box::new(MarkdownRule::new(
            1,
            "add-on-deal",
            Money::from_major(10),
        ))]);
        pos.checkout(&mut cart);
        (cart, pos)
    }

    #[test]
    fn test_item_lines() {
        let (cart, pos) = checked_out();
        let text = render(&cart, pos.rules(), true);

        assert!(text.contains("- 01, [LATTE-L]   $65.00, Latte (L) discount $0.00, Tags: #add-on-deal\n"));
        assert!(text.contains("- 02, [LATTE-L]   $65.00, Latte (L) discount $55.00, Tags: #add-on-deal\n"));
        assert!(text.contains("- 03, [BAG]    $0.50, Paper bag discount $0.00\n"));
    }

    #[test]
    fn test_legend_and_totals() {
        let (cart, pos) = checked_out();
        let text = render(&cart, pos.rules(), true);

        assert!(text.contains("Rules:\n- #1 Same-item add-on deal: Add $10.00 for one more\n"));
        assert!(text.contains("Subtotal: $130.50\n"));
        assert!(text.contains("Discount: $55.00\n"));
        assert!(text.ends_with("Total: $75.50\n"));
    }

    #[test]
    fn test_tags_can_be_hidden() {
        let (cart, pos) = checked_out();
        let text = render(&cart, pos.rules(), false);
        assert!(!text.contains("Tags:"));
    }

    #[test]
    fn test_header_carries_receipt_id() {
        let (cart, _) = checked_out();
        let receipt = Receipt::new();
        let mut buf = Vec::new();
        receipt.write_to(&mut buf, &cart, &[], true).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let first_line = text.lines().next().unwrap();
        assert!(first_line.starts_with(&format!("Receipt {}", receipt.id())));
        assert!(first_line.ends_with("UTC"));
        assert!(!text.contains("Rules:"));
    }
}
