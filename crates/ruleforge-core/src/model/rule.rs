//! Rule definitions

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Immutable rule definition: a named condition plus a descriptive message
///
/// An empty (or whitespace-only) condition marks an always-true rule; it is
/// never handed to the expression runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleDefinition")]
pub struct Rule {
    name: String,
    condition: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<i32>,
}

/// Raw rule shape as it appears in configuration, validated into a [`Rule`]
#[derive(Debug, Deserialize)]
struct RuleDefinition {
    name: String,
    #[serde(default)]
    condition: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    priority: Option<i32>,
}

impl TryFrom<RuleDefinition> for Rule {
    type Error = CoreError;

    fn try_from(def: RuleDefinition) -> Result<Self> {
        let rule = Rule::new(def.name, def.condition, def.message)?;
        Ok(match def.priority {
            Some(priority) => rule.with_priority(priority),
            None => rule,
        })
    }
}

impl Rule {
    /// Create a new rule
    ///
    /// Fails if `name` is empty.
    pub fn new(
        name: impl Into<String>,
        condition: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::InvalidRule("rule name must not be empty".to_string()));
        }

        Ok(Rule {
            name,
            condition: condition.into(),
            message: message.into(),
            priority: None,
        })
    }

    /// Create a rule that always triggers
    pub fn always(name: impl Into<String>, message: impl Into<String>) -> Result<Self> {
        Self::new(name, "", message)
    }

    /// Set the evaluation priority (lower values run first)
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn priority(&self) -> Option<i32> {
        self.priority
    }

    /// Whether this rule has no condition and therefore always triggers
    pub fn is_always_true(&self) -> bool {
        self.condition.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_creation() {
        let rule = Rule::new("AgeRule", "#customer.age >= 18", "Customer is an adult").unwrap();

        assert_eq!(rule.name(), "AgeRule");
        assert_eq!(rule.condition(), "#customer.age >= 18");
        assert_eq!(rule.message(), "Customer is an adult");
        assert!(rule.priority().is_none());
        assert!(!rule.is_always_true());
    }

    #[test]
    fn test_rule_empty_name_rejected() {
        let result = Rule::new("  ", "true", "msg");
        assert!(matches!(result, Err(CoreError::InvalidRule(_))));
    }

    #[test]
    fn test_rule_always_true() {
        let rule = Rule::always("Always", "Always fires").unwrap();
        assert!(rule.is_always_true());

        let blank = Rule::new("Blank", "   ", "").unwrap();
        assert!(blank.is_always_true());
    }

    #[test]
    fn test_rule_with_priority() {
        let rule = Rule::new("r", "true", "m").unwrap().with_priority(5);
        assert_eq!(rule.priority(), Some(5));
    }

    #[test]
    fn test_rule_deserialize_validates_name() {
        let ok: Rule = serde_yaml::from_str("name: r1\ncondition: '#x > 1'\nmessage: big\n").unwrap();
        assert_eq!(ok.name(), "r1");
        assert_eq!(ok.condition(), "#x > 1");

        let err = serde_yaml::from_str::<Rule>("name: ''\ncondition: 'true'\n");
        assert!(err.is_err());
    }
}
