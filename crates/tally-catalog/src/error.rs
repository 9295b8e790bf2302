//! # Catalog Error Types
//!
//! Everything that can go wrong before the checkout starts.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Files          │  │  Parsing        │  │  Content                │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Io             │  │  Json           │  │  InvalidRecord          │ │
//! │  │  ConfigNotFound │  │  Toml           │  │  InvalidRule            │ │
//! │  │                 │  │                 │  │  Core (duplicate ids)   │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use tally_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for catalog and configuration operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    // =========================================================================
    // Files
    // =========================================================================
    /// Reading a catalog or config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    // =========================================================================
    // Parsing
    // =========================================================================
    /// products.json is not valid JSON or has the wrong shape.
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// checkout.toml is not valid TOML or has the wrong shape.
    #[error("Invalid config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    // =========================================================================
    // Content
    // =========================================================================
    /// A product record failed validation.
    ///
    /// `index` is the 0-based position in the catalog array.
    #[error("Product record {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// A rule spec failed validation.
    ///
    /// `index` is the 0-based position in the rule list.
    #[error("Rule {index}: {reason}")]
    InvalidRule { index: usize, reason: String },

    /// Building the cart failed (duplicate line item ids).
    #[error(transparent)]
    Core(#[from] CoreError),
}
