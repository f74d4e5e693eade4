//! Subscription tier names with a `Custom` escape hatch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A subscription access level gating visibility of a parameter or value.
///
/// The well-known variants cover the standard plan ladder. `Custom(String)`
/// handles deployment-specific tiers without requiring a paramforge release.
///
/// Serializes as a flat string (e.g. `"pro"`) so it works both as JSON values
/// and as JSON object keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tier {
    Starter,
    Pro,
    Studio,
    /// Deployment-specific tier not in the well-known set.
    Custom(String),
}

impl Tier {
    /// Canonical string representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Starter => "starter",
            Self::Pro => "pro",
            Self::Studio => "studio",
            Self::Custom(s) => s.as_str(),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "starter" => Self::Starter,
            "pro" => Self::Pro,
            "studio" => Self::Studio,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl Serialize for Tier {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Tier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        // FromStr is infallible for Tier
        Ok(s.parse().unwrap())
    }
}

/// Whether a tier list admits the given tier.
///
/// An empty list means "all tiers"; restriction only kicks in once at least
/// one tier is named.
pub fn tier_allowed(tiers: &[Tier], tier: &Tier) -> bool {
    tiers.is_empty() || tiers.contains(tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_from_str() {
        assert_eq!("pro".parse::<Tier>().unwrap(), Tier::Pro);
        assert_eq!(
            "enterprise".parse::<Tier>().unwrap(),
            Tier::Custom("enterprise".into())
        );
    }

    #[test]
    fn tier_serde_roundtrip() {
        let tiers = vec![Tier::Starter, Tier::Custom("enterprise".into())];
        let json = serde_json::to_string(&tiers).unwrap();
        assert_eq!(json, "[\"starter\",\"enterprise\"]");
        let parsed: Vec<Tier> = serde_json::from_str(&json).unwrap();
        assert_eq!(tiers, parsed);
    }

    #[test]
    fn empty_tier_list_admits_everyone() {
        assert!(tier_allowed(&[], &Tier::Starter));
        assert!(tier_allowed(&[Tier::Pro], &Tier::Pro));
        assert!(!tier_allowed(&[Tier::Pro], &Tier::Starter));
    }
}
