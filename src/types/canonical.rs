//! Canonical field definitions.
//!
//! A canonical field is a provider-independent semantic parameter slot
//! (e.g. `quality.steps`). Provider schemas are heterogeneous; mapping a raw
//! parameter onto a canonical field gives it a stable identity, label, type
//! and option set that the admin configurator and generation form can rely on.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::ComponentType;

/// The semantic type of a field.
///
/// `IntegerNullable` exists for provider parameters like seeds where "unset"
/// is a meaningful payload value distinct from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Integer,
    IntegerNullable,
    Number,
    Boolean,
    Enum,
    Array,
    Object,
    Image,
}

impl FieldKind {
    /// Whether values of this kind are numeric (slider-compatible).
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::IntegerNullable | Self::Number)
    }

    /// The widget implied by this kind when no explicit override exists.
    ///
    /// String fields whose key mentions "negative" get a textarea since
    /// negative prompts are free-form multi-line text on every provider
    /// we've seen.
    pub fn implied_widget(&self, key: &str) -> ComponentType {
        match self {
            Self::Enum => ComponentType::Select,
            Self::Integer | Self::IntegerNullable | Self::Number => ComponentType::Slider,
            Self::Boolean => ComponentType::Switch,
            Self::Image => ComponentType::File,
            Self::String if key.contains("negative") => ComponentType::Textarea,
            Self::String | Self::Array | Self::Object => ComponentType::Text,
        }
    }
}

/// One selectable option of an enum-kinded canonical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalOption {
    pub value: Value,
    pub label: String,
}

impl CanonicalOption {
    pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A provider-independent semantic parameter slot.
///
/// Immutable, defined once in the embedded registry seed. The `key` is a
/// dotted `"section.name"` pair and uniquely identifies at most one slot;
/// within one model at most one raw parameter may map to a given key
/// (enforced by the resolver).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalFieldDef {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub section: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CanonicalOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl CanonicalFieldDef {
    /// Create a definition, deriving the section from the key's first
    /// dotted segment.
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        let key = key.into();
        let section = key.split('.').next().unwrap_or_default().to_string();
        Self {
            key,
            label: label.into(),
            kind,
            section,
            options: Vec::new(),
            min: None,
            max: None,
        }
    }

    /// Set the option set (for enum kinds).
    pub fn with_options(mut self, options: Vec<CanonicalOption>) -> Self {
        self.options = options;
        self
    }

    /// Set the numeric range.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// The field name (last dotted segment of the key).
    pub fn name(&self) -> &str {
        self.key.rsplit('.').next().unwrap_or(&self.key)
    }

    /// The raw values of this field's option set.
    pub fn option_values(&self) -> Vec<Value> {
        self.options.iter().map(|o| o.value.clone()).collect()
    }
}
