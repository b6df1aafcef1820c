//! Transformer rules: a rule bound to field actions and extra facts

use super::action::FieldAction;
use ruleforge_core::{Rule, Value};
use std::collections::HashMap;
use std::fmt;

/// A [`Rule`] with the actions to apply when it triggers (positive) or not
/// (negative), plus facts merged into its evaluation context
pub struct TransformerRule<T> {
    rule: Rule,
    positive_actions: Vec<FieldAction<T>>,
    negative_actions: Vec<FieldAction<T>>,
    additional_facts: HashMap<String, Value>,
}

impl<T> TransformerRule<T> {
    pub fn new(rule: Rule) -> Self {
        Self {
            rule,
            positive_actions: Vec::new(),
            negative_actions: Vec::new(),
            additional_facts: HashMap::new(),
        }
    }

    /// Create a transformer rule from all of its parts
    pub fn with_actions(
        rule: Rule,
        positive_actions: Vec<FieldAction<T>>,
        negative_actions: Vec<FieldAction<T>>,
        additional_facts: HashMap<String, Value>,
    ) -> Self {
        Self {
            rule,
            positive_actions,
            negative_actions,
            additional_facts,
        }
    }

    /// Append an action applied when the rule triggers
    pub fn on_match(mut self, action: FieldAction<T>) -> Self {
        self.positive_actions.push(action);
        self
    }

    /// Append an action applied when the rule does not trigger
    pub fn on_no_match(mut self, action: FieldAction<T>) -> Self {
        self.negative_actions.push(action);
        self
    }

    /// Add a fact to the evaluation context; it overrides `value` if named so
    pub fn with_fact(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.additional_facts.insert(name.into(), value.into());
        self
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn positive_actions(&self) -> &[FieldAction<T>] {
        &self.positive_actions
    }

    pub fn negative_actions(&self) -> &[FieldAction<T>] {
        &self.negative_actions
    }

    pub fn additional_facts(&self) -> &HashMap<String, Value> {
        &self.additional_facts
    }
}

impl<T> Clone for TransformerRule<T> {
    fn clone(&self) -> Self {
        Self {
            rule: self.rule.clone(),
            positive_actions: self.positive_actions.clone(),
            negative_actions: self.negative_actions.clone(),
            additional_facts: self.additional_facts.clone(),
        }
    }
}

impl<T> fmt::Debug for TransformerRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformerRule")
            .field("rule", &self.rule)
            .field("positive_actions", &self.positive_actions)
            .field("negative_actions", &self.negative_actions)
            .field("additional_facts", &self.additional_facts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::action::field_action;

    fn noop(name: &str) -> FieldAction<String> {
        field_action(name, |s: &String| Ok(Value::from(s.as_str())), |v, _| Ok(v), |_: &mut String, _| Ok(()))
    }

    #[test]
    fn test_builder_methods() {
        let rule = Rule::new("r", "#value.length() > 3", "long").unwrap();
        let transformer_rule = TransformerRule::new(rule)
            .on_match(noop("a"))
            .on_match(noop("b"))
            .on_no_match(noop("c"))
            .with_fact("limit", 3);

        assert_eq!(transformer_rule.rule().name(), "r");
        let positive: Vec<&str> = transformer_rule
            .positive_actions()
            .iter()
            .map(FieldAction::field_name)
            .collect();
        assert_eq!(positive, vec!["a", "b"]);
        assert_eq!(transformer_rule.negative_actions().len(), 1);
        assert_eq!(
            transformer_rule.additional_facts().get("limit"),
            Some(&Value::Number(3.0))
        );
    }
}
