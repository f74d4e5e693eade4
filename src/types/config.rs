//! The administrator-authored configuration overlay.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::canonical::FieldKind;
use super::tier::{Tier, tier_allowed};
use super::transform::NumericTransform;
use super::visibility::VisibilityCondition;

/// Which form control renders a parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    /// Derive the widget from the resolved field kind.
    #[default]
    Auto,
    Text,
    Textarea,
    Slider,
    Select,
    Switch,
    File,
}

impl ComponentType {
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

/// One entry of a parameter's discrete value list.
///
/// Invariants, enforced by the store and re-checked defensively at resolve
/// time: at most one entry per list has `is_default = true`, and `value` is
/// unique within the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterValue {
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub is_default: bool,
    /// Credits surcharge applied when this value is selected. Never negative.
    #[serde(default)]
    pub price: f64,
    /// Tiers allowed to select this value; empty means all tiers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_tiers: Vec<Tier>,
}

impl ParameterValue {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            label: None,
            enabled: true,
            is_default: false,
            price: 0.0,
            access_tiers: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price.max(0.0);
        self
    }

    pub fn with_tiers(mut self, tiers: Vec<Tier>) -> Self {
        self.access_tiers = tiers;
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Whether the given tier may select this value.
    pub fn visible_to(&self, tier: &Tier) -> bool {
        tier_allowed(&self.access_tiers, tier)
    }

    /// Display label, falling back to the raw value rendered as text.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => match &self.value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }
    }
}

/// Per-parameter admin overlay, persisted as part of the model's
/// configuration document.
///
/// Everything here is optional layering on top of whatever the provider's
/// raw schema declares; an absent config means pure defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_description: Option<String>,
    /// Mapping into the canonical field registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_key: Option<String>,
    #[serde(default, skip_serializing_if = "ComponentType::is_auto")]
    pub component_type: ComponentType,
    /// Payload type override.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<FieldKind>,
    /// Restricts the enum/select domain; absent means all raw values allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<Value>>,
    /// Canonical option value (rendered as a string key) to raw payload value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_map: Option<BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_multiply: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_offset: Option<f64>,
    /// Display-range override, independent of the payload range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui_max: Option<f64>,
    /// Single-clause conditional visibility: shown only while the named
    /// sibling parameter equals `visible_if_value`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_if_param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_if_value: Option<Value>,
    /// Tiers allowed to see this parameter; empty means all tiers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_tiers: Vec<Tier>,
    /// Discrete value list with per-value pricing and gating.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<ParameterValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_default: Option<Value>,
}

fn default_true() -> bool {
    true
}

impl Default for ParameterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            custom_label: None,
            custom_description: None,
            canonical_key: None,
            component_type: ComponentType::Auto,
            value_type: None,
            allowed_values: None,
            enum_map: None,
            transform_multiply: None,
            transform_offset: None,
            ui_min: None,
            ui_max: None,
            visible_if_param: None,
            visible_if_value: None,
            access_tiers: Vec::new(),
            values: Vec::new(),
            override_default: None,
        }
    }
}

impl ParameterConfig {
    /// The numeric transform configured for this parameter (identity if unset).
    pub fn transform(&self) -> NumericTransform {
        NumericTransform {
            multiply: self.transform_multiply.unwrap_or(1.0),
            offset: self.transform_offset.unwrap_or(0.0),
        }
    }

    /// The conditional visibility rule, if both halves of the clause are set.
    pub fn visibility_condition(&self) -> Option<VisibilityCondition> {
        match (&self.visible_if_param, &self.visible_if_value) {
            (Some(param), Some(value)) => {
                Some(VisibilityCondition::eq(param.clone(), value.clone()))
            }
            _ => None,
        }
    }

    /// Whether the given tier may see this parameter.
    pub fn visible_to(&self, tier: &Tier) -> bool {
        tier_allowed(&self.access_tiers, tier)
    }
}

/// Partial update applied by [`ConfigStore::upsert`](crate::store::ConfigStore::upsert).
///
/// `Some` fields replace the existing value; `None` fields are left alone.
/// Clearing a field back to its default is done with
/// [`ConfigStore::replace`](crate::store::ConfigStore::replace).
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub enabled: Option<bool>,
    pub custom_label: Option<String>,
    pub custom_description: Option<String>,
    pub canonical_key: Option<String>,
    pub component_type: Option<ComponentType>,
    pub value_type: Option<FieldKind>,
    pub allowed_values: Option<Vec<Value>>,
    pub enum_map: Option<BTreeMap<String, Value>>,
    pub transform_multiply: Option<f64>,
    pub transform_offset: Option<f64>,
    pub ui_min: Option<f64>,
    pub ui_max: Option<f64>,
    pub visible_if_param: Option<String>,
    pub visible_if_value: Option<Value>,
    pub access_tiers: Option<Vec<Tier>>,
    pub values: Option<Vec<ParameterValue>>,
    pub override_default: Option<Value>,
}

impl ConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn custom_label(mut self, label: impl Into<String>) -> Self {
        self.custom_label = Some(label.into());
        self
    }

    pub fn custom_description(mut self, description: impl Into<String>) -> Self {
        self.custom_description = Some(description.into());
        self
    }

    pub fn canonical_key(mut self, key: impl Into<String>) -> Self {
        self.canonical_key = Some(key.into());
        self
    }

    pub fn component_type(mut self, component: ComponentType) -> Self {
        self.component_type = Some(component);
        self
    }

    pub fn value_type(mut self, kind: FieldKind) -> Self {
        self.value_type = Some(kind);
        self
    }

    pub fn allowed_values(mut self, values: Vec<Value>) -> Self {
        self.allowed_values = Some(values);
        self
    }

    pub fn enum_map(mut self, map: BTreeMap<String, Value>) -> Self {
        self.enum_map = Some(map);
        self
    }

    pub fn transform(mut self, multiply: f64, offset: f64) -> Self {
        self.transform_multiply = Some(multiply);
        self.transform_offset = Some(offset);
        self
    }

    pub fn ui_range(mut self, min: f64, max: f64) -> Self {
        self.ui_min = Some(min);
        self.ui_max = Some(max);
        self
    }

    pub fn visible_if(mut self, param: impl Into<String>, value: impl Into<Value>) -> Self {
        self.visible_if_param = Some(param.into());
        self.visible_if_value = Some(value.into());
        self
    }

    pub fn access_tiers(mut self, tiers: Vec<Tier>) -> Self {
        self.access_tiers = Some(tiers);
        self
    }

    pub fn values(mut self, values: Vec<ParameterValue>) -> Self {
        self.values = Some(values);
        self
    }

    pub fn override_default(mut self, value: impl Into<Value>) -> Self {
        self.override_default = Some(value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_defaults() {
        let config = ParameterConfig::default();
        assert!(config.enabled);
        assert!(config.component_type.is_auto());
        assert!(config.transform().is_identity());
        assert!(config.visibility_condition().is_none());
    }

    #[test]
    fn enabled_defaults_true_on_the_wire() {
        let config: ParameterConfig = serde_json::from_str("{}").unwrap();
        assert!(config.enabled);
    }

    #[test]
    fn half_a_visibility_clause_is_no_clause() {
        let config = ParameterConfig {
            visible_if_param: Some("mode".into()),
            ..Default::default()
        };
        assert!(config.visibility_condition().is_none());
    }

    #[test]
    fn value_display_label_falls_back_to_value() {
        assert_eq!(ParameterValue::new("16:9").display_label(), "16:9");
        assert_eq!(ParameterValue::new(json!(30)).display_label(), "30");
        assert_eq!(
            ParameterValue::new("16:9").with_label("Widescreen").display_label(),
            "Widescreen"
        );
    }

    #[test]
    fn value_price_never_negative() {
        assert_eq!(ParameterValue::new("4k").with_price(-5.0).price, 0.0);
    }
}
