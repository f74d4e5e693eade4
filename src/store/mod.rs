//! Per-model configuration store.
//!
//! The store is the mutable half of the engine's input: the admin-authored
//! overlay keyed by parameter id. Every operation is snapshot-in,
//! snapshot-out. Methods take `&self` and return a new [`ConfigStore`],
//! never mutating shared state, so the caller can layer optimistic
//! concurrency checks on top; concurrent admin edits are a last-write-wins
//! concern at the persistence boundary, not arbitrated here.

pub mod pricing;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::canonical::CanonicalRegistry;
use crate::types::{ConfigUpdate, ParameterConfig, ParameterValue};

/// An immutable snapshot of one model's parameter configurations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigStore {
    configs: BTreeMap<String, ParameterConfig>,
}

impl ConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a persisted config map.
    pub fn from_map(configs: BTreeMap<String, ParameterConfig>) -> Self {
        Self { configs }
    }

    /// Consume the store, yielding the config map for persistence.
    pub fn into_map(self) -> BTreeMap<String, ParameterConfig> {
        self.configs
    }

    /// The underlying config map.
    pub fn as_map(&self) -> &BTreeMap<String, ParameterConfig> {
        &self.configs
    }

    /// Get the config for one parameter.
    pub fn get(&self, param_id: &str) -> Option<&ParameterConfig> {
        self.configs.get(param_id)
    }

    /// Configured parameter ids, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().map(String::as_str)
    }

    /// Number of configured parameters.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Whether no parameter is configured.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Apply a partial update to one parameter's config, creating it if
    /// absent. Returns the updated snapshot.
    ///
    /// When the update sets a `canonical_key` that resolves in the registry,
    /// `component_type` and the value type are derived from the canonical
    /// field's kind unless the same update sets them explicitly, and
    /// `custom_label` is populated from the canonical label unless a custom
    /// label already exists. An unknown key is accepted but left unmapped;
    /// the resolver reports it as a warning.
    pub fn upsert(
        &self,
        registry: &CanonicalRegistry,
        param_id: &str,
        update: ConfigUpdate,
    ) -> Self {
        let mut next = self.clone();
        let mut config = next.configs.remove(param_id).unwrap_or_default();

        // Derivation only applies to the update that sets the mapping, and
        // never overrides widget or type choices made in that same update.
        let mapping_set = update.canonical_key.is_some();
        let derive_component = update.component_type.is_none();
        let derive_type = update.value_type.is_none();

        apply_update(&mut config, update);

        if mapping_set {
            let key = config.canonical_key.clone().unwrap_or_default();
            match registry.get(&key) {
                Some(field) => {
                    if derive_component {
                        config.component_type = field.kind.implied_widget(&field.key);
                    }
                    if derive_type {
                        config.value_type = Some(field.kind);
                    }
                    if config.custom_label.is_none() {
                        config.custom_label = Some(field.label.clone());
                    }
                }
                None => {
                    tracing::warn!(param_id, canonical_key = %key, "unknown canonical key");
                }
            }
        }

        enforce_single_default(&mut config.values);
        next.configs.insert(param_id.to_string(), config);
        next
    }

    /// Replace one parameter's config wholesale.
    ///
    /// This is the escape hatch for clearing fields that `upsert`'s partial
    /// merge cannot unset.
    pub fn replace(&self, param_id: &str, mut config: ParameterConfig) -> Self {
        enforce_single_default(&mut config.values);
        let mut next = self.clone();
        next.configs.insert(param_id.to_string(), config);
        next
    }

    /// Delete one parameter's config. The raw schema is untouched; if the
    /// scanner rediscovers the key later it reappears unconfigured.
    pub fn remove(&self, param_id: &str) -> Self {
        let mut next = self.clone();
        next.configs.remove(param_id);
        next
    }

    /// Mark one value entry as the default, clearing the flag on every
    /// sibling in the same operation.
    pub fn set_default_value(&self, param_id: &str, value: &Value) -> Self {
        let mut next = self.clone();
        if let Some(config) = next.configs.get_mut(param_id) {
            for entry in &mut config.values {
                entry.is_default = &entry.value == value;
            }
        }
        next
    }

    /// Add a value entry to a parameter's list, or update the existing entry
    /// with the same value. Values stay unique within the list.
    pub fn add_value(&self, param_id: &str, entry: ParameterValue) -> Self {
        let mut next = self.clone();
        let config = next.configs.entry(param_id.to_string()).or_default();
        match config.values.iter_mut().find(|v| v.value == entry.value) {
            Some(existing) => *existing = entry,
            None => config.values.push(entry),
        }
        enforce_single_default(&mut config.values);
        next
    }

    /// Remove a value entry from a parameter's list.
    pub fn remove_value(&self, param_id: &str, value: &Value) -> Self {
        let mut next = self.clone();
        if let Some(config) = next.configs.get_mut(param_id) {
            config.values.retain(|entry| &entry.value != value);
        }
        next
    }
}

/// Merge a partial update into a config. `Some` fields replace, `None`
/// fields are left alone.
fn apply_update(config: &mut ParameterConfig, update: ConfigUpdate) {
    if let Some(enabled) = update.enabled {
        config.enabled = enabled;
    }
    if let Some(label) = update.custom_label {
        config.custom_label = Some(label);
    }
    if let Some(description) = update.custom_description {
        config.custom_description = Some(description);
    }
    if let Some(key) = update.canonical_key {
        config.canonical_key = Some(key);
    }
    if let Some(component) = update.component_type {
        config.component_type = component;
    }
    if let Some(kind) = update.value_type {
        config.value_type = Some(kind);
    }
    if let Some(values) = update.allowed_values {
        config.allowed_values = Some(values);
    }
    if let Some(map) = update.enum_map {
        config.enum_map = Some(map);
    }
    if let Some(multiply) = update.transform_multiply {
        config.transform_multiply = Some(multiply);
    }
    if let Some(offset) = update.transform_offset {
        config.transform_offset = Some(offset);
    }
    if let Some(min) = update.ui_min {
        config.ui_min = Some(min);
    }
    if let Some(max) = update.ui_max {
        config.ui_max = Some(max);
    }
    if let Some(param) = update.visible_if_param {
        config.visible_if_param = Some(param);
    }
    if let Some(value) = update.visible_if_value {
        config.visible_if_value = Some(value);
    }
    if let Some(tiers) = update.access_tiers {
        config.access_tiers = tiers;
    }
    if let Some(values) = update.values {
        config.values = dedupe_values(values);
    }
    if let Some(value) = update.override_default {
        config.override_default = Some(value);
    }
}

/// Drop duplicate values, keeping the first occurrence of each.
fn dedupe_values(values: Vec<ParameterValue>) -> Vec<ParameterValue> {
    let mut seen: Vec<Value> = Vec::with_capacity(values.len());
    values
        .into_iter()
        .filter(|entry| {
            if seen.contains(&entry.value) {
                false
            } else {
                seen.push(entry.value.clone());
                true
            }
        })
        .collect()
}

/// Keep at most one `is_default` flag; the last one set wins.
fn enforce_single_default(values: &mut [ParameterValue]) {
    let last_default = values.iter().rposition(|entry| entry.is_default);
    if let Some(keep) = last_default {
        for (index, entry) in values.iter_mut().enumerate() {
            entry.is_default = index == keep;
        }
    }
}
