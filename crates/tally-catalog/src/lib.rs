//! # tally-catalog: Catalog & Rule Configuration
//!
//! Loads what the pure engine in `tally-core` needs from disk.
//!
//! ## Module Organization
//! ```text
//! tally_catalog/
//! ├── lib.rs       ◄─── You are here (exports)
//! ├── products.rs  ◄─── products.json → Vec<LineItem> with unique ids
//! ├── rules.rs     ◄─── RuleSpec → Box<dyn DiscountRule>, default rule set
//! ├── config.rs    ◄─── checkout.toml + environment → CheckoutConfig
//! └── error.rs     ◄─── CatalogError
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_catalog::{CatalogLoader, CheckoutConfig};
//! use tally_core::Cart;
//!
//! let mut loader = CatalogLoader::new();
//! let items = loader
//!     .load_str(r#"[{ "sku": "TEA", "name": "Tea", "price": 25, "tags": ["best-selling-drinks"] },
//!                   { "sku": "TEA", "name": "Tea", "price": 25, "tags": ["best-selling-drinks"] }]"#)
//!     .unwrap();
//!
//! let mut cart = Cart::from_items(items).unwrap();
//! let pos = CheckoutConfig::default().build_pos().unwrap();
//! let total = pos.checkout(&mut cart);
//! assert_eq!(total.cents(), 5000 - 600);
//! ```

pub mod config;
pub mod error;
pub mod products;
pub mod rules;

pub use config::{CatalogSettings, CheckoutConfig, ReportSettings};
pub use error::{CatalogError, CatalogResult};
pub use products::{CatalogLoader, ProductRecord};
pub use rules::{build_rules, default_rule_specs, RuleSpec, DEFAULT_ADD_ON_TAG, DEFAULT_DRINKS_TAG};
