//! Configuration lifecycle classification.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::schema::scan;
use crate::types::ProviderModel;

/// Where a model sits in its configuration lifecycle.
///
/// Transitions are triggered externally by schema fetches and config saves;
/// the engine only classifies whatever snapshot it is handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigLifecycle {
    /// No raw schema fetched yet.
    Unconfigured,
    /// Schema present, no admin config; the spec builds entirely from
    /// defaults.
    Discovered,
    /// At least one config entry exists and every configured key is still
    /// discoverable in the schema.
    Configured,
    /// A schema refresh has orphaned configured keys. The model still
    /// builds a usable spec; the admin sees a pending-review signal.
    Stale,
}

/// What an admin should look at after a schema refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReview {
    /// Configured keys no longer present in the schema. Never deleted
    /// automatically; surfaced for cleanup.
    pub orphaned: BTreeSet<String>,
    /// Schema keys with no configuration yet.
    pub discovered: BTreeSet<String>,
}

impl PendingReview {
    /// Whether there is anything to review.
    pub fn is_empty(&self) -> bool {
        self.orphaned.is_empty() && self.discovered.is_empty()
    }
}

/// Classify a model snapshot.
pub fn classify(model: &ProviderModel) -> ConfigLifecycle {
    let Some(schema) = &model.raw_schema else {
        return ConfigLifecycle::Unconfigured;
    };
    if model.configs.is_empty() {
        return ConfigLifecycle::Discovered;
    }
    let scanned = scan(schema);
    let orphaned = model.configs.keys().any(|key| !scanned.contains(key));
    if orphaned {
        ConfigLifecycle::Stale
    } else {
        ConfigLifecycle::Configured
    }
}

/// Compute the pending-review summary for a model snapshot.
pub fn pending_review(model: &ProviderModel) -> PendingReview {
    let scanned = model.raw_schema.as_ref().map(scan).unwrap_or_default();
    let configured: BTreeSet<String> = model.configs.keys().cloned().collect();
    PendingReview {
        orphaned: configured.difference(&scanned).cloned().collect(),
        discovered: scanned.difference(&configured).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParameterConfig;
    use serde_json::json;

    fn schema() -> serde_json::Value {
        json!({"properties": {"steps": {"type": "integer"}, "seed": {"type": "integer"}}})
    }

    #[test]
    fn classification_walks_the_lifecycle() {
        let model = ProviderModel::new("acme/sdxl");
        assert_eq!(classify(&model), ConfigLifecycle::Unconfigured);

        let model = model.with_schema(schema());
        assert_eq!(classify(&model), ConfigLifecycle::Discovered);

        let model = model.with_config("steps", ParameterConfig::default());
        assert_eq!(classify(&model), ConfigLifecycle::Configured);

        let model = model.with_config("old_param", ParameterConfig::default());
        assert_eq!(classify(&model), ConfigLifecycle::Stale);
    }

    #[test]
    fn pending_review_reports_both_directions() {
        let model = ProviderModel::new("acme/sdxl")
            .with_schema(schema())
            .with_config("old_param", ParameterConfig::default());
        let review = pending_review(&model);
        assert!(review.orphaned.contains("old_param"));
        assert!(review.discovered.contains("steps"));
        assert!(review.discovered.contains("seed"));
        assert!(!review.is_empty());
    }
}
