use std::collections::BTreeMap;

use paramforge::{
    CanonicalRegistry, ConfigStore, ConfigUpdate, ParameterValue, ProviderModel, ResolveWarning,
    Tier, apply_visibility, build_spec, visible_to,
};
use serde_json::json;

fn schema() -> serde_json::Value {
    json!({
        "properties": {
            "aspect_ratio": {"type": "string", "enum": ["1:1", "16:9", "9:16"], "default": "1:1"},
            "steps": {"type": "integer", "minimum": 1, "maximum": 100, "default": 30},
            "prompt": {"type": "string", "required": true},
            "width": {"type": "integer", "minimum": 64, "maximum": 2048}
        }
    })
}

fn configured_model(registry: &CanonicalRegistry) -> ProviderModel {
    let store = ConfigStore::new()
        .upsert(
            registry,
            "aspect_ratio",
            ConfigUpdate::new().canonical_key("frame.aspect_ratio"),
        )
        .upsert(registry, "steps", ConfigUpdate::new().ui_range(1.0, 50.0));
    ProviderModel::new("acme/sdxl")
        .with_schema(schema())
        .with_configs(store.into_map())
}

#[test]
fn discovered_model_builds_a_spec_from_defaults() {
    let registry = CanonicalRegistry::with_embedded_seed();
    let model = ProviderModel::new("acme/sdxl").with_schema(schema());
    let spec = build_spec(&model, &registry);

    assert_eq!(spec.len(), 4);
    assert!(spec.iter().all(|p| !p.configured));
    let steps = spec.iter().find(|p| p.id == "steps").unwrap();
    assert_eq!(steps.default, Some(json!(30)));
}

#[test]
fn union_includes_manually_added_parameters() {
    let registry = CanonicalRegistry::with_embedded_seed();
    let store = ConfigStore::new().upsert(
        &registry,
        "style_preset",
        ConfigUpdate::new().values(vec![ParameterValue::new("cinematic")]),
    );
    let model = ProviderModel::new("acme/sdxl")
        .with_schema(schema())
        .with_configs(store.into_map());

    let spec = build_spec(&model, &registry);
    let style = spec.iter().find(|p| p.id == "style_preset").unwrap();
    assert!(style.configured);
    assert_eq!(style.options.len(), 1);
}

#[test]
fn disabled_parameters_never_appear() {
    let registry = CanonicalRegistry::with_embedded_seed();
    let store = ConfigStore::new().upsert(
        &registry,
        "width",
        ConfigUpdate::new().enabled(false).values(vec![
            // Individually enabled values don't resurrect a disabled
            // parameter; the outer flag is a hard gate.
            ParameterValue::new(json!(1024)),
        ]),
    );
    let model = ProviderModel::new("acme/sdxl")
        .with_schema(schema())
        .with_configs(store.into_map());

    let spec = build_spec(&model, &registry);
    assert!(spec.iter().all(|p| p.id != "width"));
}

#[test]
fn ordering_is_configured_first_then_pinned_sections() {
    let registry = CanonicalRegistry::with_embedded_seed();
    let model = configured_model(&registry);
    let spec = build_spec(&model, &registry);

    let ids: Vec<_> = spec.iter().map(|p| p.id.as_str()).collect();
    // Configured: aspect_ratio (pinned to 0 via its canonical slot) before
    // steps (priority 2). Unconfigured: width (priority 1) before prompt.
    assert_eq!(ids, vec!["aspect_ratio", "steps", "width", "prompt"]);
}

#[test]
fn spec_builds_are_stable() {
    let registry = CanonicalRegistry::with_embedded_seed();
    let model = configured_model(&registry);
    assert_eq!(build_spec(&model, &registry), build_spec(&model, &registry));
}

#[test]
fn second_mapping_to_the_same_canonical_slot_is_rejected() {
    let registry = CanonicalRegistry::with_embedded_seed();
    let store = ConfigStore::new()
        .upsert(
            &registry,
            "aspect_ratio",
            ConfigUpdate::new().canonical_key("frame.aspect_ratio"),
        )
        .upsert(
            &registry,
            "ratio_alias",
            ConfigUpdate::new().canonical_key("frame.aspect_ratio"),
        );
    let model = ProviderModel::new("acme/sdxl")
        .with_schema(schema())
        .with_configs(store.into_map());

    let spec = build_spec(&model, &registry);
    let first = spec.iter().find(|p| p.id == "aspect_ratio").unwrap();
    let second = spec.iter().find(|p| p.id == "ratio_alias").unwrap();

    assert_eq!(first.canonical_key.as_deref(), Some("frame.aspect_ratio"));
    assert!(second.canonical_key.is_none());
    assert!(second.warnings.iter().any(|w| matches!(
        w,
        ResolveWarning::DuplicateCanonicalMapping { key } if key == "frame.aspect_ratio"
    )));
}

#[test]
fn conditional_visibility_follows_current_values() {
    let registry = CanonicalRegistry::with_embedded_seed();
    let store = ConfigStore::new().upsert(
        &registry,
        "width",
        ConfigUpdate::new().visible_if("aspect_ratio", "custom"),
    );
    let model = ProviderModel::new("acme/sdxl")
        .with_schema(schema())
        .with_configs(store.into_map());
    let spec = build_spec(&model, &registry);

    let hidden = apply_visibility(spec.clone(), &BTreeMap::new());
    assert!(hidden.iter().find(|p| p.id == "width").unwrap().hidden);

    let current = BTreeMap::from([("aspect_ratio".to_string(), json!("custom"))]);
    let shown = apply_visibility(spec, &current);
    assert!(!shown.iter().find(|p| p.id == "width").unwrap().hidden);
}

#[test]
fn tier_filtering_drops_gated_parameters_and_values() {
    let registry = CanonicalRegistry::with_embedded_seed();
    let store = ConfigStore::new()
        .upsert(
            &registry,
            "steps",
            ConfigUpdate::new().access_tiers(vec![Tier::Studio]),
        )
        .upsert(
            &registry,
            "aspect_ratio",
            ConfigUpdate::new().values(vec![
                ParameterValue::new("1:1"),
                ParameterValue::new("16:9").with_tiers(vec![Tier::Pro, Tier::Studio]),
            ]),
        );
    let model = ProviderModel::new("acme/sdxl")
        .with_schema(schema())
        .with_configs(store.into_map());
    let spec = build_spec(&model, &registry);

    let starter = visible_to(&spec, &Tier::Starter);
    assert!(starter.iter().all(|p| p.id != "steps"));
    let ratio = starter.iter().find(|p| p.id == "aspect_ratio").unwrap();
    assert!(!ratio.options.iter().any(|o| o.value == json!("16:9")));

    let studio = visible_to(&spec, &Tier::Studio);
    assert!(studio.iter().any(|p| p.id == "steps"));
    let ratio = studio.iter().find(|p| p.id == "aspect_ratio").unwrap();
    assert!(ratio.options.iter().any(|o| o.value == json!("16:9")));
}
