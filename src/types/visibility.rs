//! Conditional visibility rules.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A boolean condition over sibling parameter values.
///
/// The configuration surface only produces single-clause equality rules
/// (`visible_if_param` / `visible_if_value`); the evaluator accepts the full
/// tree so richer conditions can be introduced without touching consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum VisibilityCondition {
    /// The named sibling parameter currently equals `value`. A parameter
    /// with no current value never matches.
    Eq { param: String, value: Value },
    And { clauses: Vec<VisibilityCondition> },
    Or { clauses: Vec<VisibilityCondition> },
    Not { clause: Box<VisibilityCondition> },
}

impl VisibilityCondition {
    /// Single-clause equality rule.
    pub fn eq(param: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            param: param.into(),
            value: value.into(),
        }
    }

    /// Evaluate against a value lookup. Total: every input produces a bool.
    pub fn evaluate<F>(&self, lookup: &F) -> bool
    where
        F: Fn(&str) -> Option<Value>,
    {
        match self {
            Self::Eq { param, value } => lookup(param).as_ref() == Some(value),
            Self::And { clauses } => clauses.iter().all(|c| c.evaluate(lookup)),
            Self::Or { clauses } => clauses.iter().any(|c| c.evaluate(lookup)),
            Self::Not { clause } => !clause.evaluate(lookup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lookup(param: &str) -> Option<Value> {
        match param {
            "mode" => Some(json!("video")),
            "fps" => Some(json!(24)),
            _ => None,
        }
    }

    #[test]
    fn eq_matches_current_value() {
        assert!(VisibilityCondition::eq("mode", "video").evaluate(&lookup));
        assert!(!VisibilityCondition::eq("mode", "image").evaluate(&lookup));
    }

    #[test]
    fn missing_param_never_matches() {
        assert!(!VisibilityCondition::eq("scheduler", "ddim").evaluate(&lookup));
    }

    #[test]
    fn composed_conditions() {
        let cond = VisibilityCondition::And {
            clauses: vec![
                VisibilityCondition::eq("mode", "video"),
                VisibilityCondition::Not {
                    clause: Box::new(VisibilityCondition::eq("fps", 60)),
                },
            ],
        };
        assert!(cond.evaluate(&lookup));

        // Empty conjunction is vacuously true, empty disjunction is false.
        assert!(VisibilityCondition::And { clauses: vec![] }.evaluate(&lookup));
        assert!(!VisibilityCondition::Or { clauses: vec![] }.evaluate(&lookup));
    }

    #[test]
    fn condition_serde_shape() {
        let cond = VisibilityCondition::eq("mode", "video");
        let json = serde_json::to_value(&cond).unwrap();
        assert_eq!(json["op"], "eq");
        assert_eq!(json["param"], "mode");
    }
}
