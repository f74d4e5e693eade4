//! Persisted configuration document layout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::ParameterConfig;
use crate::error::Result;

/// Comparison operator of a legacy pricing rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceOperator {
    #[default]
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// Legacy per-value surcharge keyed by `(param_id, operator, value)`.
///
/// Superseded by [`ParameterValue::price`](super::config::ParameterValue);
/// read for migration only, never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRule {
    pub param_id: String,
    #[serde(default)]
    pub operator: PriceOperator,
    pub value: Value,
    pub price: f64,
}

/// One JSON document per model, as stored by the external persistence layer.
///
/// `pricing_rules` is a legacy parallel representation of per-value
/// surcharges. The engine reads both representations and prefers
/// `values[].price` when both exist; serialization deliberately drops the
/// legacy field so every save migrates forward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfigDocument {
    #[serde(default)]
    pub ui_config: BTreeMap<String, ParameterConfig>,
    #[serde(default, skip_serializing)]
    pub pricing_rules: Vec<PricingRule>,
}

impl ModelConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize for persistence. The legacy `pricing_rules` field is never
    /// part of the output.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Whether any legacy pricing rules are still attached.
    pub fn has_legacy_pricing(&self) -> bool {
        !self.pricing_rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_rules_parse_but_never_serialize() {
        let doc = ModelConfigDocument::from_json(
            r#"{
                "ui_config": {},
                "pricing_rules": [
                    {"param_id": "resolution", "value": "4k", "price": 10}
                ]
            }"#,
        )
        .unwrap();
        assert!(doc.has_legacy_pricing());
        assert_eq!(doc.pricing_rules[0].operator, PriceOperator::Eq);

        let out = doc.to_json().unwrap();
        assert!(!out.contains("pricing_rules"));
    }

    #[test]
    fn empty_document_round_trips() {
        let doc = ModelConfigDocument::new();
        let out = doc.to_json().unwrap();
        let back = ModelConfigDocument::from_json(&out).unwrap();
        assert_eq!(doc, back);
    }
}
