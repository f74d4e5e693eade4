//! Canonical field registry.
//!
//! The registry holds the fixed vocabulary of [`CanonicalFieldDef`] slots
//! that raw provider parameters are mapped onto. It is pure data, loaded
//! once from the embedded seed and read-only thereafter; the admin
//! configurator uses it to populate mapping dropdowns, and the resolver
//! consults it for labels, types, option sets and ranges.

use std::collections::BTreeMap;

use crate::types::CanonicalFieldDef;

/// Read-only registry of canonical fields keyed by dotted key.
#[derive(Debug, Clone, Default)]
pub struct CanonicalRegistry {
    fields: BTreeMap<String, CanonicalFieldDef>,
}

impl CanonicalRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field definition, replacing any existing entry with the
    /// same key.
    pub fn insert(&mut self, field: CanonicalFieldDef) {
        self.fields.insert(field.key.clone(), field);
    }

    /// Look up a field by its dotted key.
    pub fn get(&self, key: &str) -> Option<&CanonicalFieldDef> {
        self.fields.get(key)
    }

    /// List all field definitions, ordered by key.
    pub fn list(&self) -> Vec<&CanonicalFieldDef> {
        self.fields.values().collect()
    }

    /// The distinct UI sections, in key order.
    pub fn sections(&self) -> Vec<&str> {
        let mut sections: Vec<&str> = self.fields.values().map(|f| f.section.as_str()).collect();
        sections.dedup();
        sections
    }

    /// All fields belonging to one UI section.
    pub fn fields_in_section(&self, section: &str) -> Vec<&CanonicalFieldDef> {
        self.fields
            .values()
            .filter(|f| f.section == section)
            .collect()
    }

    /// Number of fields in the registry.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Create a registry pre-populated with the embedded seed data.
    ///
    /// The seed contains the curated canonical vocabulary for image and
    /// video generation. It's compiled in, so parsing it should never fail;
    /// if it somehow does, an empty registry is still usable (every
    /// parameter just resolves as unmapped).
    pub fn with_embedded_seed() -> Self {
        let mut registry = Self::new();
        match serde_json::from_str::<Vec<CanonicalFieldDef>>(EMBEDDED_SEED) {
            Ok(fields) => {
                for field in fields {
                    registry.insert(field);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse embedded canonical seed");
            }
        }
        registry
    }
}

/// Raw JSON seed data compiled into the binary.
const EMBEDDED_SEED: &str = include_str!("seed.json");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldKind;

    #[test]
    fn embedded_seed_parses() {
        let registry = CanonicalRegistry::with_embedded_seed();
        assert!(!registry.is_empty());

        let aspect = registry.get("frame.aspect_ratio").unwrap();
        assert_eq!(aspect.label, "Aspect Ratio");
        assert_eq!(aspect.kind, FieldKind::Enum);
        assert!(!aspect.options.is_empty());

        let steps = registry.get("quality.steps").unwrap();
        assert_eq!(steps.kind, FieldKind::Integer);
        assert_eq!(steps.min, Some(1.0));
    }

    #[test]
    fn sections_are_distinct() {
        let registry = CanonicalRegistry::with_embedded_seed();
        let sections = registry.sections();
        assert!(sections.contains(&"frame"));
        assert!(sections.contains(&"quality"));
        let mut deduped = sections.clone();
        deduped.dedup();
        assert_eq!(sections, deduped);
    }

    #[test]
    fn unknown_key_is_absent() {
        let registry = CanonicalRegistry::with_embedded_seed();
        assert!(registry.get("nonexistent.slot").is_none());
    }
}
