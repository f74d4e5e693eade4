//! Parameter normalization.
//!
//! [`resolve`] is the heart of the engine: it merges one raw provider
//! definition, one optional canonical mapping and one optional admin config
//! into a single render-ready [`ResolvedParameter`], following a fixed
//! precedence order. It is a pure function of its inputs. The same three
//! inputs always produce the same output, and the output replaces any prior
//! resolution wholesale.
//!
//! Precedence, highest first: admin config, canonical field, raw schema,
//! built-in fallback. Per-field rules are documented on the helpers below.

use serde_json::Value;

use crate::types::{
    CanonicalFieldDef, FieldKind, ParameterConfig, ParameterValue, RawParameterDef, ResolveWarning,
    ResolvedOption, ResolvedParameter,
};

/// Resolve one parameter against its raw definition, canonical mapping and
/// admin config. Any of the three may be absent.
///
/// `canonical` should be the registry entry for `config.canonical_key`; pass
/// `None` when the key is unknown or unset. A set key with no matching
/// canonical field resolves as unmapped and records a warning rather than
/// failing.
pub fn resolve(
    id: &str,
    raw: Option<&RawParameterDef>,
    canonical: Option<&CanonicalFieldDef>,
    config: Option<&ParameterConfig>,
) -> ResolvedParameter {
    metrics::counter!(crate::telemetry::RESOLVES_TOTAL).increment(1);

    let fallback = ParameterConfig::default();
    let configured = config.is_some();
    let cfg = config.unwrap_or(&fallback);
    let mut warnings = Vec::new();

    if let Some(key) = &cfg.canonical_key {
        if canonical.map(|c| c.key.as_str()) != Some(key.as_str()) {
            push_warning(&mut warnings, ResolveWarning::UnknownCanonicalKey { key: key.clone() });
        }
    }

    let kind = cfg
        .value_type
        .or_else(|| canonical.map(|c| c.kind))
        .or_else(|| raw.and_then(RawParameterDef::inferred_kind))
        .unwrap_or(FieldKind::String);

    let widget_hint = canonical.map(|c| c.key.as_str()).unwrap_or(id);
    let widget = if cfg.component_type.is_auto() {
        kind.implied_widget(widget_hint)
    } else {
        cfg.component_type
    };

    let label = first_nonempty(&[
        cfg.custom_label.as_deref(),
        canonical.map(|c| c.label.as_str()),
        raw.and_then(|r| r.title.as_deref()),
    ])
    .unwrap_or(id)
    .to_string();

    let description = cfg
        .custom_description
        .clone()
        .or_else(|| raw.and_then(|r| r.description.clone()));

    let domain = option_domain(raw, canonical, cfg, &mut warnings);
    let raw_default = raw.and_then(|r| r.default.as_ref());
    let values = reconcile_values(&cfg.values, &domain, raw_default);
    let values = normalize_defaults(values, &mut warnings);

    let options = resolved_options(&values, &domain, canonical);

    let default = cfg
        .override_default
        .clone()
        .or_else(|| {
            values
                .iter()
                .find(|entry| entry.is_default)
                .map(|entry| entry.value.clone())
        })
        .or_else(|| raw_default.cloned());

    let min = raw.and_then(|r| r.minimum).or_else(|| canonical.and_then(|c| c.min));
    let max = raw.and_then(|r| r.maximum).or_else(|| canonical.and_then(|c| c.max));
    let transform = cfg.transform();
    let ui_min = cfg.ui_min.or_else(|| min.map(|m| transform.to_display(m)));
    let ui_max = cfg.ui_max.or_else(|| max.map(|m| transform.to_display(m)));

    let step = match kind {
        FieldKind::Integer | FieldKind::IntegerNullable => Some(1.0),
        _ => None,
    };

    for warning in &warnings {
        metrics::counter!(
            crate::telemetry::RESOLVE_WARNINGS_TOTAL,
            "warning" => warning.as_str()
        )
        .increment(1);
    }

    ResolvedParameter {
        id: id.to_string(),
        canonical_key: canonical.map(|c| c.key.clone()),
        kind,
        label,
        description,
        widget,
        required: raw.and_then(|r| r.required).unwrap_or(false),
        min,
        max,
        ui_min,
        ui_max,
        step,
        options,
        default,
        hidden: false,
        visible_if: cfg.visibility_condition(),
        visible_to_tiers: cfg.access_tiers.clone(),
        values,
        transform,
        enum_map: cfg.enum_map.clone(),
        warnings,
        configured,
    }
}

/// First non-empty string among the candidates.
fn first_nonempty<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|s| !s.trim().is_empty())
}

/// Compute the effective discrete value domain for a parameter.
///
/// The raw enum wins when the provider declares one; a canonical enum
/// mapping supplies the domain otherwise. A non-empty `allowed_values`
/// restricts the domain to its intersection with the provider's own values;
/// an admin cannot invent values the provider would reject, so allowed
/// values outside the domain are dropped and reported.
///
/// With an `enum_map` in play the UI-facing domain is the canonical option
/// set, each option validated by translating it to its payload value first.
fn option_domain(
    raw: Option<&RawParameterDef>,
    canonical: Option<&CanonicalFieldDef>,
    cfg: &ParameterConfig,
    warnings: &mut Vec<ResolveWarning>,
) -> Vec<Value> {
    let raw_domain: Vec<Value> = raw.and_then(RawParameterDef::domain).unwrap_or(&[]).to_vec();
    let canonical_options: Vec<Value> = canonical
        .filter(|c| c.kind == FieldKind::Enum)
        .map(CanonicalFieldDef::option_values)
        .unwrap_or_default();

    let mut domain: Vec<Value> = if cfg.enum_map.is_some() && !canonical_options.is_empty() {
        // Canonical options face the UI; each translates to a payload value
        // that must survive the provider's own enum, when one is declared.
        canonical_options
            .iter()
            .filter(|&option| {
                if raw_domain.is_empty() {
                    return true;
                }
                let payload = translate_option(cfg.enum_map.as_ref(), option);
                let in_domain = raw_domain.contains(&payload);
                if !in_domain {
                    push_warning(
                        warnings,
                        ResolveWarning::ValueDomainConflict { value: option.clone() },
                    );
                }
                in_domain
            })
            .cloned()
            .collect()
    } else if !raw_domain.is_empty() {
        raw_domain
    } else {
        canonical_options
    };

    if let Some(allowed) = cfg.allowed_values.as_ref().filter(|a| !a.is_empty()) {
        for value in allowed {
            if !domain.contains(value) {
                push_warning(warnings, ResolveWarning::ValueDomainConflict { value: value.clone() });
            }
        }
        domain.retain(|value| allowed.contains(value));
    }
    domain
}

/// Translate a UI-facing option value to its payload value through an
/// `enum_map`, falling back to identity when the option is unmapped or no
/// map exists.
pub fn translate_option(
    map: Option<&std::collections::BTreeMap<String, Value>>,
    option: &Value,
) -> Value {
    let Some(map) = map else {
        return option.clone();
    };
    let key = option_key(option);
    map.get(&key).cloned().unwrap_or_else(|| option.clone())
}

/// Enum-map keys are strings; non-string option values use their JSON
/// rendering.
fn option_key(option: &Value) -> String {
    match option {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Reconcile a persisted value list against the current option domain.
///
/// Entries matching a still-present option are kept untouched, preserving
/// admin edits. Options with no entry are appended with neutral settings
/// (enabled, no surcharge, all tiers); a new entry is only flagged default
/// when it equals the raw schema's declared default and no existing entry
/// already holds the flag. Entries whose value has left the domain are kept
/// (the admin may be editing ahead of a schema refresh) and merely excluded
/// from the resolved options downstream.
///
/// Idempotent: reconciling twice with no schema change yields the same list.
pub fn reconcile_values(
    existing: &[ParameterValue],
    domain: &[Value],
    raw_default: Option<&Value>,
) -> Vec<ParameterValue> {
    let mut reconciled = existing.to_vec();
    let has_default = reconciled.iter().any(|entry| entry.is_default);
    for option in domain {
        if reconciled.iter().any(|entry| &entry.value == option) {
            continue;
        }
        let mut entry = ParameterValue::new(option.clone());
        entry.is_default = !has_default && raw_default == Some(option);
        reconciled.push(entry);
    }
    reconciled
}

/// Defensive single-default normalization, independent of the store's own
/// invariant enforcement: persisted data may predate it or arrive from a
/// foreign writer. The most recently set flag (last in list order) wins.
fn normalize_defaults(
    mut values: Vec<ParameterValue>,
    warnings: &mut Vec<ResolveWarning>,
) -> Vec<ParameterValue> {
    let defaults: Vec<usize> = values
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| entry.is_default.then_some(index))
        .collect();
    if let (Some(&keep), true) = (defaults.last(), defaults.len() > 1) {
        push_warning(
            warnings,
            ResolveWarning::DuplicateDefault { kept: values[keep].value.clone() },
        );
        for (index, entry) in values.iter_mut().enumerate() {
            entry.is_default = index == keep;
        }
    }
    values
}

/// Build the resolved option list: enabled value entries whose value is
/// still in the domain (all enabled entries when no domain exists, which is
/// the discrete-numeric-points case). Labels fall back through canonical
/// option labels before the raw value rendering.
fn resolved_options(
    values: &[ParameterValue],
    domain: &[Value],
    canonical: Option<&CanonicalFieldDef>,
) -> Vec<ResolvedOption> {
    values
        .iter()
        .filter(|entry| entry.enabled)
        .filter(|entry| domain.is_empty() || domain.contains(&entry.value))
        .map(|entry| {
            let label = entry.label.clone().or_else(|| canonical_label(canonical, &entry.value));
            ResolvedOption {
                value: entry.value.clone(),
                label: label.unwrap_or_else(|| entry.display_label()),
            }
        })
        .collect()
}

fn canonical_label(canonical: Option<&CanonicalFieldDef>, value: &Value) -> Option<String> {
    canonical?
        .options
        .iter()
        .find(|option| &option.value == value)
        .map(|option| option.label.clone())
}

fn push_warning(warnings: &mut Vec<ResolveWarning>, warning: ResolveWarning) {
    tracing::warn!(warning = warning.as_str(), detail = ?warning, "resolve warning");
    if !warnings.contains(&warning) {
        warnings.push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reconcile_preserves_existing_entries() {
        let existing = vec![ParameterValue::new("1:1").with_price(2.0).disabled()];
        let domain = vec![json!("1:1"), json!("16:9")];
        let reconciled = reconcile_values(&existing, &domain, None);
        assert_eq!(reconciled.len(), 2);
        assert_eq!(reconciled[0].price, 2.0);
        assert!(!reconciled[0].enabled);
        assert!(reconciled[1].enabled);
        assert_eq!(reconciled[1].price, 0.0);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let domain = vec![json!("a"), json!("b")];
        let once = reconcile_values(&[], &domain, Some(&json!("a")));
        let twice = reconcile_values(&once, &domain, Some(&json!("a")));
        assert_eq!(once, twice);
    }

    #[test]
    fn reconcile_never_steals_an_existing_default() {
        let existing = vec![ParameterValue::new("b").as_default()];
        let domain = vec![json!("a"), json!("b")];
        let reconciled = reconcile_values(&existing, &domain, Some(&json!("a")));
        assert!(reconciled[0].is_default);
        assert!(!reconciled[1].is_default);
    }

    #[test]
    fn duplicate_defaults_keep_the_last() {
        let values = vec![
            ParameterValue::new("a").as_default(),
            ParameterValue::new("b").as_default(),
        ];
        let mut warnings = Vec::new();
        let normalized = normalize_defaults(values, &mut warnings);
        assert!(!normalized[0].is_default);
        assert!(normalized[1].is_default);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn vanished_values_are_kept_but_not_offered() {
        let existing = vec![ParameterValue::new("3:2").with_price(1.0)];
        let domain = vec![json!("1:1")];
        let values = reconcile_values(&existing, &domain, None);
        assert_eq!(values.len(), 2);
        let options = resolved_options(&values, &domain, None);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].value, json!("1:1"));
    }
}
