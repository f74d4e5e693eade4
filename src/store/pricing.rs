//! Legacy pricing-rule migration.
//!
//! Older configuration documents carried per-value surcharges as a parallel
//! `pricing_rules` array keyed by `(param_id, operator, value)`. The current
//! representation is `ParameterValue::price` inside each config's value
//! list. All translation logic lives here and nowhere else, so the legacy
//! path can be deleted later without touching the resolver.

use std::collections::BTreeMap;

use crate::types::{ModelConfigDocument, ParameterValue, PriceOperator, PricingRule};

/// Translate legacy pricing rules into per-parameter value entries.
///
/// Only equality rules translate to a per-value surcharge; rules with any
/// other operator are logged and skipped rather than priced wrong. Later
/// rules for the same `(param_id, value)` pair win, matching the
/// last-write-wins behaviour of the persistence layer they came from.
pub fn pricing_rules_to_values(rules: &[PricingRule]) -> BTreeMap<String, Vec<ParameterValue>> {
    let mut translated: BTreeMap<String, Vec<ParameterValue>> = BTreeMap::new();
    for rule in rules {
        if rule.operator != PriceOperator::Eq {
            tracing::warn!(
                param_id = %rule.param_id,
                operator = ?rule.operator,
                "skipping non-equality pricing rule"
            );
            continue;
        }
        let entries = translated.entry(rule.param_id.clone()).or_default();
        let entry = ParameterValue::new(rule.value.clone()).with_price(rule.price);
        match entries.iter_mut().find(|e| e.value == rule.value) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
    }
    translated
}

/// Migrate a document's legacy pricing rules into its config value lists.
///
/// Read-merge semantics: a value entry already present in `ui_config` keeps
/// its own price (the new representation is preferred when both exist);
/// legacy rules only contribute entries that don't exist yet. The legacy
/// array is consumed, so serializing the returned document writes only the
/// new representation.
pub fn migrate_document(mut document: ModelConfigDocument) -> ModelConfigDocument {
    if document.pricing_rules.is_empty() {
        return document;
    }

    let translated = pricing_rules_to_values(&document.pricing_rules);
    let mut migrated = 0u64;

    for (param_id, entries) in translated {
        let config = document.ui_config.entry(param_id).or_default();
        for entry in entries {
            if config.values.iter().any(|v| v.value == entry.value) {
                continue;
            }
            config.values.push(entry);
            migrated += 1;
        }
    }

    document.pricing_rules.clear();
    metrics::counter!(crate::telemetry::PRICING_RULES_MIGRATED_TOTAL).increment(migrated);
    document
}
