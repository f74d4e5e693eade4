//! Raw provider parameter definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::canonical::FieldKind;

/// A parameter as declared by a specific provider's own schema.
///
/// Untrusted and partial: any field may be absent, and unknown fields are
/// ignored. This is whatever sits under `properties[key]` in the provider
/// document, nothing more.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawParameterDef {
    /// Declared JSON-schema type string, if any.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Declared enum domain, if any.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl RawParameterDef {
    /// Parse a definition from an arbitrary JSON value.
    ///
    /// Returns `None` for non-objects and for objects whose declared fields
    /// have the wrong shape (a provider sending `"minimum": "one"` is treated
    /// as having sent no definition at all).
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// Infer the field kind from the declared type and enum.
    ///
    /// An enum domain wins over the type string: providers routinely declare
    /// `type: "string"` alongside an enum list.
    pub fn inferred_kind(&self) -> Option<FieldKind> {
        if self.enum_values.as_ref().is_some_and(|v| !v.is_empty()) {
            return Some(FieldKind::Enum);
        }
        match self.type_name.as_deref()? {
            "string" => Some(FieldKind::String),
            "integer" => Some(FieldKind::Integer),
            "number" => Some(FieldKind::Number),
            "boolean" => Some(FieldKind::Boolean),
            "array" => Some(FieldKind::Array),
            "object" => Some(FieldKind::Object),
            _ => None,
        }
    }

    /// The discrete value domain declared by the provider, if any.
    pub fn domain(&self) -> Option<&[Value]> {
        self.enum_values.as_deref()
    }
}
