//! Linear numeric transform between display and payload values.

use serde::{Deserialize, Serialize};

/// The linear mapping between a UI-displayed numeric value and the raw
/// payload value sent to the provider.
///
/// Outbound: `payload = display * multiply + offset`. Inbound (showing a
/// stored payload value back to the user): `display = (payload - offset) /
/// multiply`. Identity when unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericTransform {
    #[serde(default = "default_multiply")]
    pub multiply: f64,
    #[serde(default)]
    pub offset: f64,
}

fn default_multiply() -> f64 {
    1.0
}

impl Default for NumericTransform {
    fn default() -> Self {
        Self {
            multiply: 1.0,
            offset: 0.0,
        }
    }
}

impl NumericTransform {
    pub fn new(multiply: f64, offset: f64) -> Self {
        Self { multiply, offset }
    }

    /// Whether this transform leaves values unchanged.
    pub fn is_identity(&self) -> bool {
        self.multiply == 1.0 && self.offset == 0.0
    }

    // A zero multiplier would make the transform non-invertible; treat it
    // as 1.0 rather than divide by zero.
    fn effective_multiply(&self) -> f64 {
        if self.multiply == 0.0 {
            tracing::warn!("numeric transform with zero multiplier, treating as identity");
            1.0
        } else {
            self.multiply
        }
    }

    /// Convert a display value into the payload value sent to the provider.
    pub fn to_payload(&self, display: f64) -> f64 {
        display * self.effective_multiply() + self.offset
    }

    /// Convert a stored payload value back into its display value.
    pub fn to_display(&self, payload: f64) -> f64 {
        (payload - self.offset) / self.effective_multiply()
    }
}
