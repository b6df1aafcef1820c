//! Named, ordered collections of rules

use super::rule::Rule;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// A named set of rules
///
/// Rule names are unique within a set. Evaluation order follows
/// [`RuleSet::ordered`]: ascending priority, declaration order among ties,
/// rules without a priority after all prioritized ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleSetDefinition")]
pub struct RuleSet {
    name: String,
    rules: Vec<Rule>,
}

/// Raw rule set shape, checked for unique rule names on conversion
#[derive(Debug, Deserialize)]
struct RuleSetDefinition {
    name: String,
    #[serde(default)]
    rules: Vec<Rule>,
}

impl TryFrom<RuleSetDefinition> for RuleSet {
    type Error = CoreError;

    fn try_from(def: RuleSetDefinition) -> Result<Self> {
        let set = RuleSet {
            name: def.name,
            rules: def.rules,
        };
        set.check_unique_names()?;
        Ok(set)
    }
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Parse a rule set from YAML
    ///
    /// ```yaml
    /// name: customer-checks
    /// rules:
    ///   - name: adult
    ///     condition: "#customer.age >= 18"
    ///     message: Customer is an adult
    ///     priority: 1
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let def: RuleSetDefinition = serde_yaml::from_str(yaml)?;
        RuleSet::try_from(def)
    }

    /// Add a rule, rejecting duplicate names
    pub fn add_rule(&mut self, rule: Rule) -> Result<()> {
        if self.rules.iter().any(|r| r.name() == rule.name()) {
            return Err(CoreError::DuplicateRule {
                rule_set: self.name.clone(),
                rule: rule.name().to_string(),
            });
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Builder-style variant of [`RuleSet::add_rule`]
    pub fn with_rule(mut self, rule: Rule) -> Result<Self> {
        self.add_rule(rule)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in declaration order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name() == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in evaluation order
    pub fn ordered(&self) -> Vec<Rule> {
        let mut rules = self.rules.clone();
        // sort_by_key is stable, so ties keep declaration order
        rules.sort_by_key(|r| (r.priority().is_none(), r.priority()));
        rules
    }

    fn check_unique_names(&self) -> Result<()> {
        for (i, rule) in self.rules.iter().enumerate() {
            if self.rules[..i].iter().any(|r| r.name() == rule.name()) {
                return Err(CoreError::DuplicateRule {
                    rule_set: self.name.clone(),
                    rule: rule.name().to_string(),
                });
            }
        }
        Ok(())
    }
}
