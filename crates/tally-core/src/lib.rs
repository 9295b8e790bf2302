//! # tally-core: Pure Discount Engine for Tally POS
//!
//! This crate is the **heart** of Tally POS: the discount rules and the
//! checkout engine that sequences them. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/tally-cli                               │   │
//! │  │        args ──► logging ──► checkout ──► receipt on stdout      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-catalog                                │   │
//! │  │     products.json ──► LineItems      checkout.toml ──► rules    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   rules   │  │    pos    │  │   │
//! │  │   │ LineItem  │  │   Money   │  │ Markdown  │  │ checkout  │  │   │
//! │  │   │   Cart    │  │ percent_of│  │ PercentOff│  │  engine   │  │   │
//! │  │   └───────────┘  └───────────┘  │ Compound  │  └───────────┘  │   │
//! │  │                                 └───────────┘                  │   │
//! │  │   NO I/O • NO FILES • NO CONSOLE OUTPUT                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `LineItem` and `Cart`
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`rules`] - the `DiscountRule` contract and its strategies
//! - [`pos`] - the checkout engine
//! - [`validation`] - input checks applied before items and rules are built
//! - [`error`] - domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{Cart, LineItem, MarkdownRule, Money, Pos};
//!
//! let mut cart = Cart::from_items(vec![
//!     LineItem::new(1, "X", "Tea", Money::from_major(100), ["T"]),
//!     LineItem::new(2, "X", "Tea", Money::from_major(100), ["T"]),
//! ])
//! .unwrap();
//!
//! let pos = Pos::with_rules(vec![Box::new(MarkdownRule::new(1, "T", Money::from_major(10)))]);
//! let total = pos.checkout(&mut cart);
//!
//! assert_eq!(cart.items()[1].discount(), Money::from_major(90));
//! assert_eq!(total, Money::from_major(110));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pos;
pub mod rules;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pos::Pos;
pub use rules::{CompoundRule, DiscountRule, MarkdownRule, PercentOffRule, RuleInfo};
pub use types::{Cart, LineItem};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Upper bound for any percent-off rule parameter.
pub const MAX_PERCENT_OFF: u8 = 100;
