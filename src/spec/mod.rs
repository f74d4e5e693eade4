//! Resolved spec assembly and payload building.
//!
//! This is the layer the two consumers talk to: [`build_spec`] packages
//! every resolved parameter of a model into one ordered list for form
//! renderers, and [`build_payload`] walks the opposite direction, turning
//! user input back into the value map the raw provider call expects.

mod lifecycle;

pub use lifecycle::{ConfigLifecycle, PendingReview, classify, pending_review};

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};

use crate::canonical::CanonicalRegistry;
use crate::error::{ParamforgeError, Result};
use crate::resolver::{resolve, translate_option};
use crate::schema::{find_definition, scan};
use crate::types::{FieldKind, ProviderModel, ResolveWarning, ResolvedParameter, Tier};

/// Build the ordered, render-ready spec for a model.
///
/// Resolution runs over the union of the keys discovered in the raw schema
/// and the configured keys, so manually-added parameters missing from the
/// schema still appear. Parameters disabled by the admin are dropped
/// entirely; nothing from a disabled parameter ever reaches a consumer.
///
/// Ordering is a UI affordance but must be stable: configured parameters
/// first, then by section priority (format and aspect-ratio fields pinned
/// earliest), then alphabetically by id.
pub fn build_spec(model: &ProviderModel, registry: &CanonicalRegistry) -> Vec<ResolvedParameter> {
    metrics::counter!(crate::telemetry::SPEC_BUILDS_TOTAL).increment(1);

    let mut keys: BTreeSet<String> = model
        .raw_schema
        .as_ref()
        .map(scan)
        .unwrap_or_default();
    keys.extend(model.configs.keys().cloned());

    // One raw parameter per canonical key per model; first claim in key
    // order wins, later claims resolve unmapped with a warning.
    let mut claimed_canonical: BTreeSet<String> = BTreeSet::new();

    let mut spec: Vec<ResolvedParameter> = Vec::with_capacity(keys.len());
    for key in &keys {
        let config = model.configs.get(key);
        if let Some(config) = config {
            if !config.enabled {
                continue;
            }
        }
        let raw = model
            .raw_schema
            .as_ref()
            .and_then(|schema| find_definition(key, schema));

        let (canonical, duplicate) = match config.and_then(|c| c.canonical_key.as_deref()) {
            Some(canonical_key) => {
                if claimed_canonical.contains(canonical_key) {
                    (None, Some(canonical_key.to_string()))
                } else {
                    let field = registry.get(canonical_key);
                    if field.is_some() {
                        claimed_canonical.insert(canonical_key.to_string());
                    }
                    (field, None)
                }
            }
            None => (None, None),
        };

        let mut resolved = resolve(key, raw.as_ref(), canonical, config);
        if let Some(key) = duplicate {
            // resolve() already recorded UnknownCanonicalKey for the
            // unmatched mapping; replace it with the precise diagnosis.
            resolved
                .warnings
                .retain(|w| !matches!(w, ResolveWarning::UnknownCanonicalKey { .. }));
            resolved
                .warnings
                .push(ResolveWarning::DuplicateCanonicalMapping { key });
        }
        spec.push(resolved);
    }

    spec.sort_by(|a, b| {
        (!a.configured, order_priority(a), a.id.as_str())
            .cmp(&(!b.configured, order_priority(b), b.id.as_str()))
    });
    spec
}

/// Fixed section priority table pinning layout-defining parameters first.
fn order_priority(param: &ResolvedParameter) -> u8 {
    const TIERS: [(&[&str], u8); 3] = [
        (&["format", "aspect_ratio"], 0),
        (&["resolution", "size", "width", "height"], 1),
        (&["quality", "steps", "num_outputs"], 2),
    ];
    let name = param
        .canonical_key
        .as_deref()
        .and_then(|key| key.rsplit('.').next())
        .unwrap_or(&param.id);
    for (names, priority) in TIERS {
        if names.contains(&name) {
            return priority;
        }
    }
    10
}

/// Build the outbound provider payload from user input.
///
/// For each parameter present in `user_values`, the display value is pushed
/// through the numeric transform and the enum remap to obtain what the
/// provider expects. Absent parameters contribute their resolved default if
/// one exists and are omitted otherwise. A `required` parameter with
/// neither is the one condition surfaced as an error; an incomplete payload
/// is worse than no payload.
pub fn build_payload(
    spec: &[ResolvedParameter],
    user_values: &BTreeMap<String, Value>,
) -> Result<Map<String, Value>> {
    let mut payload = Map::new();
    for param in spec {
        match user_values.get(&param.id) {
            Some(value) => {
                payload.insert(param.id.clone(), outbound_value(param, value));
            }
            None => match &param.default {
                // Defaults are already payload-space values; they bypass
                // the display transform.
                Some(default) => {
                    payload.insert(param.id.clone(), default.clone());
                }
                None if param.required => {
                    metrics::counter!(
                        crate::telemetry::PAYLOAD_BUILDS_TOTAL,
                        "status" => "error"
                    )
                    .increment(1);
                    return Err(ParamforgeError::MissingRequiredValue {
                        param: param.id.clone(),
                    });
                }
                None => {}
            },
        }
    }
    metrics::counter!(crate::telemetry::PAYLOAD_BUILDS_TOTAL, "status" => "ok").increment(1);
    Ok(payload)
}

/// Translate one user-supplied display value into payload space.
fn outbound_value(param: &ResolvedParameter, value: &Value) -> Value {
    if param.kind.is_numeric() && !param.transform.is_identity() {
        if let Some(display) = value.as_f64() {
            return number_value(param.kind, param.transform.to_payload(display));
        }
    }
    if param.enum_map.is_some() {
        return translate_option(param.enum_map.as_ref(), value);
    }
    value.clone()
}

/// Render a transformed number, collapsing back to an integer when the kind
/// and the value allow it.
fn number_value(kind: FieldKind, number: f64) -> Value {
    if matches!(kind, FieldKind::Integer | FieldKind::IntegerNullable) && number.fract() == 0.0 {
        return Value::from(number as i64);
    }
    serde_json::Number::from_f64(number)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Evaluate conditional visibility against the current form values and set
/// each parameter's `hidden` flag. Parameters without a clause stay visible.
pub fn apply_visibility(
    mut spec: Vec<ResolvedParameter>,
    current_values: &BTreeMap<String, Value>,
) -> Vec<ResolvedParameter> {
    let lookup = |param: &str| current_values.get(param).cloned();
    for param in &mut spec {
        param.hidden = param
            .visible_if
            .as_ref()
            .map(|condition| !condition.evaluate(&lookup))
            .unwrap_or(false);
    }
    spec
}

/// Filter a spec down to what one subscription tier may see.
///
/// Parameters gated behind another tier disappear; within the survivors,
/// value entries and options the tier may not select are removed.
pub fn visible_to(spec: &[ResolvedParameter], tier: &Tier) -> Vec<ResolvedParameter> {
    spec.iter()
        .filter(|param| param.visible_to(tier))
        .map(|param| {
            let mut param = param.clone();
            let options: Vec<_> = param.options_for(tier).into_iter().cloned().collect();
            param.options = options;
            param.values.retain(|value| value.visible_to(tier));
            param
        })
        .collect()
}
