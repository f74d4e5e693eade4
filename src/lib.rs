//! Paramforge - parameter normalization for generation providers
//!
//! Third-party generation providers (image and video models) each expose
//! their own parameter schema: different shapes, names, types, enums and
//! ranges. This crate resolves those heterogeneous schemas, together with
//! an administrator-authored configuration overlay, into one stable,
//! canonical, render-ready parameter spec that an admin configurator and an
//! end-user generation form can both consume without knowing provider
//! quirks.
//!
//! The engine is a pure, synchronous transformation library. It owns no
//! I/O: schema fetching and config persistence live in the surrounding
//! application, which hands in snapshots and stores what comes back.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use paramforge::{
//!     CanonicalRegistry, ConfigStore, ConfigUpdate, ProviderModel, build_payload, build_spec,
//! };
//! use serde_json::json;
//!
//! let registry = CanonicalRegistry::with_embedded_seed();
//!
//! // Admin maps the provider's `aspect_ratio` onto its canonical slot.
//! let store = ConfigStore::new().upsert(
//!     &registry,
//!     "aspect_ratio",
//!     ConfigUpdate::new().canonical_key("frame.aspect_ratio"),
//! );
//!
//! let model = ProviderModel::new("acme/sdxl")
//!     .with_schema(json!({
//!         "properties": {
//!             "aspect_ratio": {"type": "string", "enum": ["1:1", "16:9"], "default": "1:1"},
//!             "steps": {"type": "integer", "minimum": 1, "maximum": 100, "default": 30}
//!         }
//!     }))
//!     .with_configs(store.into_map());
//!
//! let spec = build_spec(&model, &registry);
//! assert_eq!(spec[0].id, "aspect_ratio");
//! assert_eq!(spec[0].label, "Aspect Ratio");
//!
//! // No user input: every parameter falls back to its resolved default.
//! let payload = build_payload(&spec, &BTreeMap::new()).unwrap();
//! assert_eq!(payload["steps"], json!(30));
//! assert_eq!(payload["aspect_ratio"], json!("1:1"));
//! ```

pub mod canonical;
pub mod error;
pub mod resolver;
pub mod schema;
pub mod spec;
pub mod store;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use canonical::CanonicalRegistry;
pub use error::{ParamforgeError, Result};
pub use resolver::{reconcile_values, resolve, translate_option};
pub use schema::{MAX_SCAN_DEPTH, SchemaNode, find_definition, scan};
pub use spec::{
    ConfigLifecycle, PendingReview, apply_visibility, build_payload, build_spec, classify,
    pending_review, visible_to,
};
pub use store::ConfigStore;
pub use store::pricing::{migrate_document, pricing_rules_to_values};

// Re-export all types
pub use types::{
    CanonicalFieldDef, CanonicalOption, ComponentType, ConfigUpdate, FieldKind,
    GenerationCapabilities, ModelConfigDocument, NumericTransform, ParameterConfig,
    ParameterValue, PriceOperator, PricingRule, ProviderModel, RawParameterDef, ResolveWarning,
    ResolvedOption, ResolvedParameter, Tier, VisibilityCondition, tier_allowed,
};
