//! Public types for the paramforge API.

mod canonical;
mod capabilities;
mod config;
mod document;
mod model;
mod raw;
mod resolved;
mod tier;
mod transform;
mod visibility;

pub use canonical::{CanonicalFieldDef, CanonicalOption, FieldKind};
pub use capabilities::GenerationCapabilities;
pub use config::{ComponentType, ConfigUpdate, ParameterConfig, ParameterValue};
pub use document::{ModelConfigDocument, PriceOperator, PricingRule};
pub use model::ProviderModel;
pub use raw::RawParameterDef;
pub use resolved::{ResolvedOption, ResolvedParameter, ResolveWarning};
pub use tier::{Tier, tier_allowed};
pub use transform::NumericTransform;
pub use visibility::VisibilityCondition;
