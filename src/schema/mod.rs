//! Raw schema scanning.
//!
//! Providers expose parameter schemas in whatever shape their API emits:
//! a bare `{properties: {...}}` object, an OpenAPI document with the real
//! parameters buried under `components.schemas.Input`, or something else
//! entirely. The scanner walks the document structurally, to a bounded
//! depth, and reports every parameter key declared under a `properties`
//! container anywhere in the tree.
//!
//! All operations here are pure and side-effect-free. Malformed input is
//! never an error: it just discovers nothing.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::types::RawParameterDef;

/// Maximum traversal depth, guarding against cyclic or pathological
/// documents. Deep enough for OpenAPI-style nesting
/// (`components.schemas.Input.properties.*`).
pub const MAX_SCAN_DEPTH: usize = 5;

/// Structural view of a raw schema document.
///
/// Built once per scan; key discovery is a pattern match over these
/// variants rather than ad hoc property probing.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// A parameter definition: an object with definition fields and no
    /// nested `properties` of its own.
    Leaf(RawParameterDef),
    /// An object bearing a `properties` member; its children are
    /// discoverable parameters.
    Container(BTreeMap<String, SchemaNode>),
    /// A structural object with no `properties` and no definition fields;
    /// traversal continues into its members.
    Branch(BTreeMap<String, SchemaNode>),
    /// Scalars, arrays, nulls, or anything past the depth limit.
    Unknown,
}

/// Fields whose presence marks an object as a parameter definition rather
/// than structural nesting.
const DEF_MARKERS: [&str; 7] = [
    "type",
    "enum",
    "default",
    "minimum",
    "maximum",
    "title",
    "description",
];

impl SchemaNode {
    /// Classify a raw document.
    pub fn from_value(value: &Value) -> Self {
        Self::classify(value, 0)
    }

    fn classify(value: &Value, depth: usize) -> Self {
        if depth >= MAX_SCAN_DEPTH {
            tracing::debug!(depth, "schema traversal depth limit reached");
            return Self::Unknown;
        }
        let Some(object) = value.as_object() else {
            return Self::Unknown;
        };
        if let Some(properties) = object.get("properties").and_then(Value::as_object) {
            let children = properties
                .iter()
                .map(|(key, child)| (key.clone(), Self::classify(child, depth + 1)))
                .collect();
            return Self::Container(children);
        }
        if DEF_MARKERS.iter().any(|marker| object.contains_key(*marker)) {
            return Self::Leaf(RawParameterDef::from_value(value).unwrap_or_default());
        }
        let children = object
            .iter()
            .map(|(key, child)| (key.clone(), Self::classify(child, depth + 1)))
            .collect();
        Self::Branch(children)
    }

    /// Collect every parameter key declared by a `properties` container in
    /// this subtree.
    pub fn keys(&self) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys(&self, keys: &mut BTreeSet<String>) {
        match self {
            Self::Container(children) => {
                for (key, child) in children {
                    keys.insert(key.clone());
                    child.collect_keys(keys);
                }
            }
            Self::Branch(children) => {
                for child in children.values() {
                    child.collect_keys(keys);
                }
            }
            Self::Leaf(_) | Self::Unknown => {}
        }
    }
}

/// Discover the set of raw parameter keys in a provider schema.
///
/// Any object with a `properties` member, at any depth up to
/// [`MAX_SCAN_DEPTH`], contributes its child keys. `null` and non-object
/// input yield an empty set. Idempotent and side-effect-free.
pub fn scan(schema: &Value) -> BTreeSet<String> {
    metrics::counter!(crate::telemetry::SCANS_TOTAL).increment(1);
    SchemaNode::from_value(schema).keys()
}

/// Find the raw definition of one parameter key.
///
/// Returns the first `properties[key]` found in traversal order. Traversal
/// order is deterministic for a given document (object members visit in
/// sorted key order) but which duplicate wins across exotic schema shapes is
/// a documented limitation, not a guarantee; only presence and primitive
/// fields are consumed downstream.
pub fn find_definition(key: &str, schema: &Value) -> Option<RawParameterDef> {
    find_in_value(key, schema, 0)
}

fn find_in_value(key: &str, value: &Value, depth: usize) -> Option<RawParameterDef> {
    if depth >= MAX_SCAN_DEPTH {
        return None;
    }
    let object = value.as_object()?;
    if let Some(properties) = object.get("properties").and_then(Value::as_object) {
        if let Some(def) = properties.get(key) {
            return RawParameterDef::from_value(def).or(Some(RawParameterDef::default()));
        }
    }
    object
        .values()
        .find_map(|child| find_in_value(key, child, depth + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_flat_schema() {
        let node = SchemaNode::from_value(&json!({
            "properties": {
                "steps": {"type": "integer"},
                "prompt": {"type": "string"}
            }
        }));
        let SchemaNode::Container(children) = node else {
            panic!("expected container");
        };
        assert!(matches!(children["steps"], SchemaNode::Leaf(_)));
    }

    #[test]
    fn classifies_openapi_wrapper_as_branch() {
        let node = SchemaNode::from_value(&json!({
            "components": {"schemas": {"Input": {"properties": {"seed": {}}}}}
        }));
        assert!(matches!(node, SchemaNode::Branch(_)));
        assert_eq!(node.keys(), BTreeSet::from(["seed".to_string()]));
    }

    #[test]
    fn depth_limit_stops_traversal() {
        // properties sits at depth 6, one past the limit
        let deep = json!({
            "a": {"b": {"c": {"d": {"e": {"properties": {"steps": {}}}}}}}
        });
        assert!(scan(&deep).is_empty());
    }
}
