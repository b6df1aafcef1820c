//! Rule evaluation results
//!
//! A [`RuleResult`] is the tagged outcome of evaluating one rule or one rule
//! set. Every result carries a process-unique id and a creation timestamp for
//! traceability; neither takes part in equality.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const DEFAULT_ERROR_CAUSE: &str = "unknown evaluation error";

/// Discriminant of a [`RuleResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultType {
    Match,
    NoMatch,
    Error,
    NoRules,
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResultType::Match => "MATCH",
            ResultType::NoMatch => "NO_MATCH",
            ResultType::Error => "ERROR",
            ResultType::NoRules => "NO_RULES",
        };
        f.write_str(s)
    }
}

/// Variant payload of a [`RuleResult`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// A rule fired
    Match { rule_name: String, message: String },
    /// No rule fired
    NoMatch,
    /// Evaluation failed
    Error { rule_name: String, message: String },
    /// The rule list was empty
    NoRules,
}

/// Result of a rule evaluation
///
/// Only the four constructors below create results, so a `Match` always has
/// a message and an `Error` always has a cause.
#[derive(Debug, Clone, Serialize)]
pub struct RuleResult {
    id: Uuid,
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    outcome: Outcome,
}

impl RuleResult {
    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            outcome,
        }
    }

    /// A rule fired. A blank message is replaced with a generated one.
    pub fn matched(rule_name: impl Into<String>, message: impl Into<String>) -> Self {
        let rule_name = rule_name.into();
        let mut message = message.into();
        if message.trim().is_empty() {
            message = format!("Rule '{}' matched", rule_name);
        }
        Self::with_outcome(Outcome::Match { rule_name, message })
    }

    /// No rule fired
    pub fn no_match() -> Self {
        Self::with_outcome(Outcome::NoMatch)
    }

    /// Evaluation failed. A blank cause is replaced with a generic one.
    pub fn error(rule_name: impl Into<String>, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = DEFAULT_ERROR_CAUSE.to_string();
        }
        Self::with_outcome(Outcome::Error {
            rule_name: rule_name.into(),
            message,
        })
    }

    /// The rule list was empty
    pub fn no_rules() -> Self {
        Self::with_outcome(Outcome::NoRules)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn result_type(&self) -> ResultType {
        match self.outcome {
            Outcome::Match { .. } => ResultType::Match,
            Outcome::NoMatch => ResultType::NoMatch,
            Outcome::Error { .. } => ResultType::Error,
            Outcome::NoRules => ResultType::NoRules,
        }
    }

    /// True only for `Match`
    pub fn is_triggered(&self) -> bool {
        matches!(self.outcome, Outcome::Match { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error { .. })
    }

    /// Name of the rule, present for `Match` and `Error`
    pub fn rule_name(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Match { rule_name, .. } | Outcome::Error { rule_name, .. } => Some(rule_name),
            Outcome::NoMatch | Outcome::NoRules => None,
        }
    }

    /// Message, present for `Match` and `Error`
    pub fn message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Match { message, .. } | Outcome::Error { message, .. } => Some(message),
            Outcome::NoMatch | Outcome::NoRules => None,
        }
    }
}

impl PartialEq for RuleResult {
    fn eq(&self, other: &Self) -> bool {
        self.outcome == other.outcome
    }
}

impl fmt::Display for RuleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Match { rule_name, message } | Outcome::Error { rule_name, message } => {
                write!(f, "{} [{}]: {}", self.result_type(), rule_name, message)
            }
            Outcome::NoMatch | Outcome::NoRules => write!(f, "{}", self.result_type()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_result() {
        let result = RuleResult::matched("AgeRule", "Customer is an adult");
        assert!(result.is_triggered());
        assert!(!result.is_error());
        assert_eq!(result.result_type(), ResultType::Match);
        assert_eq!(result.rule_name(), Some("AgeRule"));
        assert_eq!(result.message(), Some("Customer is an adult"));
    }

    #[test]
    fn test_match_blank_message_replaced() {
        let result = RuleResult::matched("AgeRule", "");
        assert_eq!(result.message(), Some("Rule 'AgeRule' matched"));
    }

    #[test]
    fn test_error_always_has_cause() {
        let result = RuleResult::error("Broken", "  ");
        assert!(result.is_error());
        assert!(!result.is_triggered());
        assert_eq!(result.message(), Some(DEFAULT_ERROR_CAUSE));
    }

    #[test]
    fn test_no_match_and_no_rules_have_no_name() {
        let no_match = RuleResult::no_match();
        let no_rules = RuleResult::no_rules();

        assert_eq!(no_match.result_type(), ResultType::NoMatch);
        assert_eq!(no_rules.result_type(), ResultType::NoRules);
        assert!(no_match.rule_name().is_none());
        assert!(no_rules.message().is_none());
        assert!(!no_match.is_triggered());
        assert!(!no_rules.is_triggered());
    }

    #[test]
    fn test_ids_are_unique_and_ignored_by_equality() {
        let a = RuleResult::matched("r", "m");
        let b = RuleResult::matched("r", "m");
        assert_ne!(a.id(), b.id());
        assert_eq!(a, b);
        assert_ne!(a, RuleResult::no_match());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            RuleResult::error("r", "boom").to_string(),
            "ERROR [r]: boom"
        );
        assert_eq!(RuleResult::no_rules().to_string(), "NO_RULES");
    }

    #[test]
    fn test_serialize_includes_type_tag() {
        let json = serde_json::to_value(RuleResult::matched("r", "m")).unwrap();
        assert_eq!(json["type"], "MATCH");
        assert_eq!(json["rule_name"], "r");
        assert!(json.get("id").is_some());
    }
}
