//! Resolved parameters, the engine's render-ready output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::canonical::FieldKind;
use super::config::{ComponentType, ParameterValue};
use super::tier::{Tier, tier_allowed};
use super::transform::NumericTransform;
use super::visibility::VisibilityCondition;

/// One selectable option in a resolved parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedOption {
    pub value: Value,
    pub label: String,
}

impl ResolvedOption {
    pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A non-fatal problem found while resolving a parameter.
///
/// These are data, not just log lines: the admin configurator displays them
/// next to the offending parameter. The underlying config is never mutated
/// on their account, so a later schema refresh can self-heal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum ResolveWarning {
    /// `canonical_key` references a key absent from the registry; the
    /// parameter resolves as unmapped.
    UnknownCanonicalKey { key: String },
    /// An `allowed_values` or `enum_map` entry references a value outside
    /// the provider's current domain; the value is excluded from the
    /// resolved options.
    ValueDomainConflict { value: Value },
    /// More than one value entry was marked default; the last one was kept.
    DuplicateDefault { kept: Value },
    /// Another parameter of the same model already maps to this canonical
    /// key; this parameter resolves as unmapped.
    DuplicateCanonicalMapping { key: String },
}

impl ResolveWarning {
    /// Stable label used as the `warning` metric label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownCanonicalKey { .. } => "unknown_canonical_key",
            Self::ValueDomainConflict { .. } => "value_domain_conflict",
            Self::DuplicateDefault { .. } => "duplicate_default",
            Self::DuplicateCanonicalMapping { .. } => "duplicate_canonical_mapping",
        }
    }
}

/// The final, merged, render-ready description of one parameter.
///
/// Derived, never persisted: recomputed on every schema load or config edit
/// and replaced wholesale, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedParameter {
    pub id: String,
    /// The canonical slot this parameter resolved against, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_key: Option<String>,
    pub kind: FieldKind,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Concrete widget; never `Auto` after resolution.
    pub widget: ComponentType,
    pub required: bool,
    /// Payload bounds from the raw schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Display bounds for slider widgets, after `ui_min`/`ui_max` overrides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// Selectable options, already filtered to enabled, in-domain values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ResolvedOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Set by [`apply_visibility`](crate::spec::apply_visibility) once
    /// current form values are known; `false` straight out of resolution.
    #[serde(default)]
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_if: Option<VisibilityCondition>,
    /// Tiers allowed to see this parameter; empty means all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub visible_to_tiers: Vec<Tier>,
    /// The reconciled value list, including entries whose value has left the
    /// provider domain (those are kept for the admin but excluded from
    /// `options`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<ParameterValue>,
    #[serde(default, skip_serializing_if = "NumericTransform::is_identity")]
    pub transform: NumericTransform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_map: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ResolveWarning>,
    /// Whether an admin config existed for this parameter. Configured
    /// parameters sort ahead of unconfigured ones in the spec.
    pub configured: bool,
}

impl ResolvedParameter {
    /// Whether the given tier may see this parameter at all.
    pub fn visible_to(&self, tier: &Tier) -> bool {
        tier_allowed(&self.visible_to_tiers, tier)
    }

    /// Options the given tier may actually select.
    ///
    /// Entries gated behind another tier are filtered out here rather than
    /// at resolve time, so one resolved spec serves every tier.
    pub fn options_for(&self, tier: &Tier) -> Vec<&ResolvedOption> {
        self.options
            .iter()
            .filter(|option| {
                self.values
                    .iter()
                    .find(|value| value.value == option.value)
                    .map(|value| value.visible_to(tier))
                    .unwrap_or(true)
            })
            .collect()
    }

    /// Credits surcharge for selecting the given value, if any.
    pub fn price_for(&self, value: &Value) -> Option<f64> {
        self.values
            .iter()
            .find(|entry| &entry.value == value)
            .map(|entry| entry.price)
            .filter(|price| *price > 0.0)
    }
}
