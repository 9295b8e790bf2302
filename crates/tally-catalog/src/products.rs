//! # Product Catalog Loader
//!
//! Turns a JSON product list into line items with unique, monotonic ids.
//!
//! ## File Format
//! ```json
//! [
//!   { "sku": "LATTE-L", "name": "Latte (L)", "price": 65, "tags": ["add-on-deal"] },
//!   { "sku": "TEA-500", "name": "Green Tea", "price": "25.5", "tags": null }
//! ]
//! ```
//! - Keys also accept the capitalized spellings `SKU`, `Name`, `Price`, `Tags`
//! - `price` is a JSON number or a decimal string, at most two decimals
//! - `tags` may be omitted or `null` (no tags)
//! - Every entry is one purchased unit; repeat an entry to buy it twice
//!
//! ## Id Assignment
//! ```text
//! loader.load_path("a.json")  ──► ids 1, 2, 3
//! loader.load_path("b.json")  ──► ids 4, 5          (seed carries over)
//! loader.load_path("bad.json") ─► error, seed unchanged
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tally_core::validation::{
    validate_price, validate_product_name, validate_sku, validate_tag, ValidationResult,
};
use tally_core::{LineItem, Money};
use tracing::{debug, info};

use crate::error::{CatalogError, CatalogResult};

// =============================================================================
// Product Record
// =============================================================================

/// Price as written in the catalog: a number or decimal text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(serde_json::Number),
    Text(String),
}

impl RawPrice {
    fn to_money(&self) -> ValidationResult<Money> {
        match self {
            RawPrice::Number(n) => Money::parse_decimal(&n.to_string()),
            RawPrice::Text(s) => Money::parse_decimal(s),
        }
    }
}

/// One entry of products.json, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    #[serde(alias = "SKU", alias = "Sku")]
    sku: String,

    #[serde(alias = "Name")]
    name: String,

    #[serde(alias = "Price")]
    price: RawPrice,

    #[serde(default, alias = "Tags")]
    tags: Option<Vec<String>>,
}

impl ProductRecord {
    /// Validates the record and converts it into an undiscounted line item.
    fn into_line_item(self, id: u32) -> ValidationResult<LineItem> {
        validate_sku(&self.sku)?;
        validate_product_name(&self.name)?;

        let price = self.price.to_money()?;
        validate_price("price", price)?;

        let tags = self.tags.unwrap_or_default();
        for tag in &tags {
            validate_tag(tag)?;
        }

        Ok(LineItem::new(
            id,
            self.sku.trim(),
            self.name.trim(),
            price,
            tags.iter().map(|t| t.trim().to_string()),
        ))
    }
}

// =============================================================================
// Catalog Loader
// =============================================================================

/// Loads catalogs and assigns line item ids from a shared seed.
///
/// Use one loader per cart so ids stay unique within it.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    next_id: u32,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        CatalogLoader { next_id: 1 }
    }
}

impl CatalogLoader {
    /// Creates a loader whose first item gets id 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next loaded item will receive.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Loads a catalog file.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> CatalogResult<Vec<LineItem>> {
        let path = path.as_ref();
        info!(?path, "Loading product catalog");
        let file = File::open(path)?;
        self.load_reader(BufReader::new(file))
    }

    /// Loads a catalog from any reader.
    pub fn load_reader<R: Read>(&mut self, reader: R) -> CatalogResult<Vec<LineItem>> {
        let records: Vec<ProductRecord> = serde_json::from_reader(reader)?;
        self.assign(records)
    }

    /// Loads a catalog from a JSON string.
    pub fn load_str(&mut self, json: &str) -> CatalogResult<Vec<LineItem>> {
        let records: Vec<ProductRecord> = serde_json::from_str(json)?;
        self.assign(records)
    }

    /// Validates every record, then assigns ids in file order.
    ///
    /// Ids are only consumed once the whole batch is valid.
    fn assign(&mut self, records: Vec<ProductRecord>) -> CatalogResult<Vec<LineItem>> {
        let mut items = Vec::with_capacity(records.len());
        let mut id = self.next_id;

        for (index, record) in records.into_iter().enumerate() {
            let item = record
                .into_line_item(id)
                .map_err(|source| CatalogError::InvalidRecord { index, source })?;
            items.push(item);
            id += 1;
        }

        debug!(first_id = self.next_id, count = items.len(), "Catalog ids assigned");
        self.next_id = id;
        Ok(items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
