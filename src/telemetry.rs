//! Telemetry metric name constants.
//!
//! Centralised metric names for paramforge operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `paramforge_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `status`: outcome, "ok" or "error"
//! - `warning`: resolve warning kind (e.g. "unknown_canonical_key")

/// Total schema scans performed.
pub const SCANS_TOTAL: &str = "paramforge_scans_total";

/// Total parameter resolutions performed.
pub const RESOLVES_TOTAL: &str = "paramforge_resolves_total";

/// Total non-fatal warnings recorded during resolution.
///
/// Labels: `warning`.
pub const RESOLVE_WARNINGS_TOTAL: &str = "paramforge_resolve_warnings_total";

/// Total resolved specs built.
pub const SPEC_BUILDS_TOTAL: &str = "paramforge_spec_builds_total";

/// Total provider payloads built.
///
/// Labels: `status` ("ok" | "error").
pub const PAYLOAD_BUILDS_TOTAL: &str = "paramforge_payload_builds_total";

/// Total legacy pricing rules translated into value-list surcharges.
pub const PRICING_RULES_MIGRATED_TOTAL: &str = "paramforge_pricing_rules_migrated_total";
