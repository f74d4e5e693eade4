use std::collections::BTreeMap;

use paramforge::{
    CanonicalRegistry, ConfigStore, ConfigUpdate, ParamforgeError, ProviderModel, build_payload,
    build_spec,
};
use serde_json::json;

fn registry() -> CanonicalRegistry {
    CanonicalRegistry::with_embedded_seed()
}

fn user(values: &[(&str, serde_json::Value)]) -> BTreeMap<String, serde_json::Value> {
    values
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

#[test]
fn display_values_are_scaled_into_payload_space() {
    let registry = registry();
    let store = ConfigStore::new().upsert(
        &registry,
        "guidance",
        ConfigUpdate::new().transform(0.01, 0.0),
    );
    let model = ProviderModel::new("acme/sdxl")
        .with_schema(json!({
            "properties": {"guidance": {"type": "number", "minimum": 0, "maximum": 1}}
        }))
        .with_configs(store.into_map());
    let spec = build_spec(&model, &registry);

    let payload = build_payload(&spec, &user(&[("guidance", json!(75))])).unwrap();
    assert_eq!(payload["guidance"], json!(0.75));
}

#[test]
fn transform_round_trips_over_the_payload_range() {
    let registry = registry();
    let store = ConfigStore::new().upsert(&registry, "steps", ConfigUpdate::new().transform(2.0, 5.0));
    let model = ProviderModel::new("acme/sdxl")
        .with_schema(json!({
            "properties": {"steps": {"type": "integer", "minimum": 5, "maximum": 205}}
        }))
        .with_configs(store.into_map());
    let spec = build_spec(&model, &registry);
    let steps = &spec[0];

    for display in [0.0, 1.0, 50.0, 100.0] {
        let payload = steps.transform.to_payload(display);
        assert_eq!(steps.transform.to_display(payload), display);
    }
}

#[test]
fn integer_parameters_stay_integers_after_scaling() {
    let registry = registry();
    let store = ConfigStore::new().upsert(&registry, "steps", ConfigUpdate::new().transform(2.0, 0.0));
    let model = ProviderModel::new("acme/sdxl")
        .with_schema(json!({
            "properties": {"steps": {"type": "integer", "minimum": 2, "maximum": 200}}
        }))
        .with_configs(store.into_map());
    let spec = build_spec(&model, &registry);

    let payload = build_payload(&spec, &user(&[("steps", json!(25))])).unwrap();
    assert_eq!(payload["steps"], json!(50));
    assert!(payload["steps"].is_i64());
}

#[test]
fn enum_remap_translates_with_identity_fallback() {
    let registry = registry();
    let mut enum_map = BTreeMap::new();
    enum_map.insert("1:1".to_string(), json!("square"));
    let store = ConfigStore::new().upsert(
        &registry,
        "aspect_ratio",
        ConfigUpdate::new()
            .canonical_key("frame.aspect_ratio")
            .enum_map(enum_map),
    );
    let model = ProviderModel::new("acme/sdxl")
        .with_schema(json!({
            "properties": {"aspect_ratio": {"enum": ["square", "16:9"]}}
        }))
        .with_configs(store.into_map());
    let spec = build_spec(&model, &registry);

    // Mapped canonical option goes through the map.
    let payload = build_payload(&spec, &user(&[("aspect_ratio", json!("1:1"))])).unwrap();
    assert_eq!(payload["aspect_ratio"], json!("square"));

    // Unmapped option falls back to its own value.
    let payload = build_payload(&spec, &user(&[("aspect_ratio", json!("16:9"))])).unwrap();
    assert_eq!(payload["aspect_ratio"], json!("16:9"));
}

#[test]
fn absent_parameters_contribute_their_defaults() {
    let registry = registry();
    let model = ProviderModel::new("acme/sdxl").with_schema(json!({
        "properties": {
            "steps": {"type": "integer", "default": 30},
            "seed": {"type": "integer"}
        }
    }));
    let spec = build_spec(&model, &registry);

    let payload = build_payload(&spec, &BTreeMap::new()).unwrap();
    assert_eq!(payload["steps"], json!(30));
    // No default, not required: omitted entirely.
    assert!(!payload.contains_key("seed"));
}

#[test]
fn defaults_bypass_the_display_transform() {
    let registry = registry();
    let store = ConfigStore::new().upsert(
        &registry,
        "guidance",
        ConfigUpdate::new().transform(0.01, 0.0),
    );
    let model = ProviderModel::new("acme/sdxl")
        .with_schema(json!({
            "properties": {"guidance": {"type": "number", "default": 0.5}}
        }))
        .with_configs(store.into_map());
    let spec = build_spec(&model, &registry);

    // The raw default is already a payload-space value.
    let payload = build_payload(&spec, &BTreeMap::new()).unwrap();
    assert_eq!(payload["guidance"], json!(0.5));
}

#[test]
fn missing_required_value_fails_the_build() {
    let registry = registry();
    let model = ProviderModel::new("acme/sdxl").with_schema(json!({
        "properties": {"prompt": {"type": "string", "required": true}}
    }));
    let spec = build_spec(&model, &registry);

    let err = build_payload(&spec, &BTreeMap::new()).unwrap_err();
    assert!(matches!(
        err,
        ParamforgeError::MissingRequiredValue { ref param } if param == "prompt"
    ));

    let payload = build_payload(&spec, &user(&[("prompt", json!("a fox"))])).unwrap();
    assert_eq!(payload["prompt"], json!("a fox"));
}

#[test]
fn override_default_feeds_the_payload() {
    let registry = registry();
    let store = ConfigStore::new().upsert(
        &registry,
        "steps",
        ConfigUpdate::new().override_default(json!(50)),
    );
    let model = ProviderModel::new("acme/sdxl")
        .with_schema(json!({
            "properties": {"steps": {"type": "integer", "default": 30}}
        }))
        .with_configs(store.into_map());
    let spec = build_spec(&model, &registry);

    let payload = build_payload(&spec, &BTreeMap::new()).unwrap();
    assert_eq!(payload["steps"], json!(50));
}
