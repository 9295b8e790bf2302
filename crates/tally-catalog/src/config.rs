//! # Checkout Configuration
//!
//! Which catalog to load, how to print the receipt, and which rules to run.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TALLY_CATALOG_PATH=./data/products.json                            │
//! │     TALLY_SHOW_TAGS=false                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, else                                              │
//! │     ~/.config/tally-pos/checkout.toml (Linux)                          │
//! │     ~/Library/Application Support/com.tally.tally-pos/checkout.toml    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     show_tags = true, default rule set                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [catalog]
//! path = "data/products.json"
//!
//! [report]
//! show_tags = true
//!
//! [[rules]]
//! kind = "markdown"
//! tag = "add-on-deal"
//! special_price_cents = 1000
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tally_core::{DiscountRule, Pos};
use tracing::{debug, info, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::rules::{build_rules, default_rule_specs, RuleSpec};

// =============================================================================
// Sections
// =============================================================================

/// `[catalog]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// products.json to load when the CLI gets no `--catalog`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// `[report]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Print `, Tags: #a,#b` after each receipt line.
    #[serde(default = "default_show_tags")]
    pub show_tags: bool,
}

fn default_show_tags() -> bool {
    true
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            show_tags: default_show_tags(),
        }
    }
}

// =============================================================================
// Checkout Config
// =============================================================================

/// Complete checkout configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub report: ReportSettings,

    /// Rules in execution order. Empty means "use the default rule set".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleSpec>,
}

impl CheckoutConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform default location)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// default file is not.
    pub fn load(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        let mut config = Self::default();

        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(CatalogError::ConfigNotFound(path));
                }
                config = Self::read_file(&path)?;
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => config = Self::read_file(&path)?,
                Some(path) => debug!(?path, "Config file not found, using defaults"),
                None => debug!("No config directory on this platform, using defaults"),
            },
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a config from TOML text (no env overrides, no validation).
    pub fn from_toml_str(contents: &str) -> CatalogResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn read_file(path: &Path) -> CatalogResult<Self> {
        info!(?path, "Loading checkout config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validates the configuration by building every rule once.
    pub fn validate(&self) -> CatalogResult<()> {
        build_rules(&self.rule_specs())?;
        Ok(())
    }

    /// Applies overrides from `lookup` (the process environment in `load`).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("TALLY_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = Some(PathBuf::from(path));
        }

        if let Some(flag) = lookup("TALLY_SHOW_TAGS") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.report.show_tags = true,
                "0" | "false" | "no" | "off" => self.report.show_tags = false,
                _ => warn!(value = %flag, "Unknown TALLY_SHOW_TAGS value, ignoring"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "tally-pos")
            .map(|dirs| dirs.config_dir().join("checkout.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Configured rule specs, or the default set when none are configured.
    pub fn rule_specs(&self) -> Vec<RuleSpec> {
        if self.rules.is_empty() {
            default_rule_specs()
        } else {
            self.rules.clone()
        }
    }

    /// Builds the configured rules in execution order.
    pub fn build_rules(&self) -> CatalogResult<Vec<Box<dyn DiscountRule>>> {
        build_rules(&self.rule_specs())
    }

    /// Builds a checkout engine with the configured rules.
    pub fn build_pos(&self) -> CatalogResult<Pos> {
        Ok(Pos::with_rules(self.build_rules()?))
    }
}
