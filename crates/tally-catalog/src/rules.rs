//! # Rule Specs
//!
//! Serializable descriptions of discount rules and the step that turns them
//! into engine rules.
//!
//! ## TOML Shape
//! ```toml
//! [[rules]]
//! kind = "compound"
//! amount_tag = "add-on-deal"
//! amount_cents = 1000
//! percent_tag = "best-selling-drinks"
//! percent_off = 12
//!
//! [[rules]]
//! kind = "markdown"
//! tag = "add-on-deal"
//! special_price_cents = 1000
//!
//! [[rules]]
//! id = 6            # optional; defaults to the 1-based list position
//! kind = "percent_off"
//! tag = "best-selling-drinks"
//! percent_off = 12
//! ```
//! List order is execution order.

use serde::{Deserialize, Serialize};
use tally_core::validation::{
    validate_distinct_tags, validate_percent_off, validate_price, validate_tag, ValidationResult,
};
use tally_core::{CompoundRule, DiscountRule, MarkdownRule, Money, PercentOffRule};
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};

/// Tag used by the shipped same-item add-on deal.
pub const DEFAULT_ADD_ON_TAG: &str = "add-on-deal";

/// Tag used by the shipped two-drinks deal.
pub const DEFAULT_DRINKS_TAG: &str = "best-selling-drinks";

// =============================================================================
// Rule Spec
// =============================================================================

/// One configured rule, before validation.
///
/// Numeric parameters are wide (`i64`) so that out-of-range values reach
/// validation instead of failing deserialization with a less useful message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSpec {
    /// Every 2nd unit of the same SKU costs `special_price_cents`.
    Markdown {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u32>,
        tag: String,
        special_price_cents: i64,
    },

    /// Every 2 tagged items get `percent_off`% off.
    PercentOff {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u32>,
        tag: String,
        percent_off: i64,
    },

    /// Markdown on `amount_tag`, percentage stacked on `percent_tag`.
    Compound {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u32>,
        amount_tag: String,
        amount_cents: i64,
        percent_tag: String,
        percent_off: i64,
    },
}

impl RuleSpec {
    /// Explicit id, if the spec sets one.
    pub fn id(&self) -> Option<u32> {
        match self {
            RuleSpec::Markdown { id, .. }
            | RuleSpec::PercentOff { id, .. }
            | RuleSpec::Compound { id, .. } => *id,
        }
    }

    /// Validates parameters and builds the engine rule.
    ///
    /// `fallback_id` is used when the spec has no explicit id.
    pub fn build(&self, fallback_id: u32) -> ValidationResult<Box<dyn DiscountRule>> {
        let id = self.id().unwrap_or(fallback_id);

        let rule: Box<dyn DiscountRule> = match self {
            RuleSpec::Markdown {
                tag,
                special_price_cents,
                ..
            } => {
                validate_tag(tag)?;
                let special_price = Money::from_cents(*special_price_cents);
                validate_price("special_price_cents", special_price)?;
                Box::new(MarkdownRule::new(id, tag.trim(), special_price))
            }
            RuleSpec::PercentOff {
                tag, percent_off, ..
            } => {
                validate_tag(tag)?;
                let percent_off = validate_percent_off(*percent_off)?;
                Box::new(PercentOffRule::new(id, tag.trim(), percent_off))
            }
            RuleSpec::Compound {
                amount_tag,
                amount_cents,
                percent_tag,
                percent_off,
                ..
            } => {
                validate_tag(amount_tag)?;
                validate_tag(percent_tag)?;
                validate_distinct_tags(amount_tag, percent_tag)?;
                let amount = Money::from_cents(*amount_cents);
                validate_price("amount_cents", amount)?;
                let percent_off = validate_percent_off(*percent_off)?;
                Box::new(CompoundRule::new(
                    id,
                    amount_tag.trim(),
                    amount,
                    percent_tag.trim(),
                    percent_off,
                ))
            }
        };

        Ok(rule)
    }
}

// =============================================================================
// Rule List
// =============================================================================

/// Builds rules in list order; ids default to the 1-based position.
///
/// ## Errors
/// [`CatalogError::InvalidRule`] for the first spec that fails validation
/// or whose id collides with an earlier rule.
pub fn build_rules(specs: &[RuleSpec]) -> CatalogResult<Vec<Box<dyn DiscountRule>>> {
    let mut rules: Vec<Box<dyn DiscountRule>> = Vec::with_capacity(specs.len());

    for (index, spec) in specs.iter().enumerate() {
        let fallback_id = u32::try_from(index + 1).map_err(|_| CatalogError::InvalidRule {
            index,
            reason: "too many rules".to_string(),
        })?;

        let rule = spec.build(fallback_id).map_err(|e| CatalogError::InvalidRule {
            index,
            reason: e.to_string(),
        })?;

        let id = rule.info().id;
        if rules.iter().any(|r| r.info().id == id) {
            return Err(CatalogError::InvalidRule {
                index,
                reason: format!("rule id {id} is used twice"),
            });
        }

        debug!(index, rule_id = id, rule = %rule.info().name, "Rule configured");
        rules.push(rule);
    }

    Ok(rules)
}

/// The rule list used when the config has no `[[rules]]`.
///
/// The compound deal runs first so that double-tagged items get both
/// discounts; the two single deals then pick up whatever is left.
pub fn default_rule_specs() -> Vec<RuleSpec> {
    vec![
        RuleSpec::Compound {
            id: None,
            amount_tag: DEFAULT_ADD_ON_TAG.to_string(),
            amount_cents: 1000,
            percent_tag: DEFAULT_DRINKS_TAG.to_string(),
            percent_off: 12,
        },
        RuleSpec::Markdown {
            id: None,
            tag: DEFAULT_ADD_ON_TAG.to_string(),
            special_price_cents: 1000,
        },
        RuleSpec::PercentOff {
            id: None,
            tag: DEFAULT_DRINKS_TAG.to_string(),
            percent_off: 12,
        },
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================
