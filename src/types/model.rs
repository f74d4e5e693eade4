//! Provider model snapshots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::capabilities::GenerationCapabilities;
use super::config::ParameterConfig;

/// One connected provider model: its raw schema, its admin configuration
/// overlay, and capability metadata.
///
/// The raw schema and the config map have independent lifecycles. The schema
/// may be refreshed externally at any time, adding or removing keys; the
/// config survives a refresh by key-based matching. Config entries whose key
/// no longer appears in the schema become orphans, surfaced for admin
/// cleanup but never deleted automatically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderModel {
    /// Model identifier (e.g. "acme/sdxl-turbo").
    pub id: String,
    /// The provider's raw parameter schema as last fetched; `None` until the
    /// first fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_schema: Option<Value>,
    /// Admin overlay keyed by parameter id.
    #[serde(default)]
    pub configs: BTreeMap<String, ParameterConfig>,
    #[serde(default)]
    pub capabilities: GenerationCapabilities,
}

impl ProviderModel {
    /// Create a model with no schema and no configuration.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Attach (or replace) the raw provider schema.
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.raw_schema = Some(schema);
        self
    }

    /// Attach a configuration entry for one parameter.
    pub fn with_config(mut self, param_id: impl Into<String>, config: ParameterConfig) -> Self {
        self.configs.insert(param_id.into(), config);
        self
    }

    /// Replace the whole configuration overlay, e.g. with a
    /// [`ConfigStore`](crate::store::ConfigStore) snapshot.
    pub fn with_configs(mut self, configs: BTreeMap<String, ParameterConfig>) -> Self {
        self.configs = configs;
        self
    }

    /// Set capability metadata.
    pub fn with_capabilities(mut self, capabilities: GenerationCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}
