//! Generic transformer
//!
//! Produces a transformed copy of a value under rule control. The original
//! is never touched: every action reads from the original and writes into
//! the copy.
//!
//! For each transformer rule, in declaration order, the rule is evaluated
//! against `{"value": original} ∪ additional_facts` and either its positive
//! or its negative actions run. A failing action (error or panic) is logged
//! and skipped, leaving its field as copied.

use super::action::FieldAction;
use super::rule::TransformerRule;
use crate::error::{Result, SdkError};
use ruleforge_core::{FactContext, RuleResult, Value};
use ruleforge_runtime::{panic_message, RulesEngine};
use serde::Serialize;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Fact name the original value is bound under
pub const VALUE_FACT: &str = "value";

/// Types a [`GenericTransformer`] can work on
///
/// `Clone` provides the copy, `Serialize` binds the original as a fact and
/// `PartialEq` answers "did anything change".
pub trait Transformable: Clone + PartialEq + Serialize + Send + Sync + 'static {}

impl<T> Transformable for T where T: Clone + PartialEq + Serialize + Send + Sync + 'static {}

/// Rule-driven copy-then-mutate transformer for values of type `T`
pub struct GenericTransformer<T> {
    name: String,
    rules_engine: RulesEngine,
    transformer_rules: Vec<TransformerRule<T>>,
}

impl<T: Transformable> GenericTransformer<T> {
    pub fn new(name: impl Into<String>, rules_engine: RulesEngine) -> Self {
        Self {
            name: name.into(),
            rules_engine,
            transformer_rules: Vec::new(),
        }
    }

    /// Create a transformer with an initial list of rules
    pub fn with_rules(
        name: impl Into<String>,
        rules_engine: RulesEngine,
        transformer_rules: Vec<TransformerRule<T>>,
    ) -> Self {
        Self {
            name: name.into(),
            rules_engine,
            transformer_rules,
        }
    }

    /// Append a rule; only valid before the transformer is shared
    pub fn add_transformation_rule(&mut self, rule: TransformerRule<T>) {
        self.transformer_rules.push(rule);
    }

    /// Builder-style variant of [`GenericTransformer::add_transformation_rule`]
    pub fn with_transformation_rule(mut self, rule: TransformerRule<T>) -> Self {
        self.add_transformation_rule(rule);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transformer_rules(&self) -> &[TransformerRule<T>] {
        &self.transformer_rules
    }

    /// Transform `value`, surfacing a failure that prevented any copy
    ///
    /// Individual action failures are not errors here; they are skipped.
    pub fn try_transform(&self, value: &T) -> Result<T> {
        let guarded = panic::catch_unwind(AssertUnwindSafe(|| self.transform_copy(value)));
        match guarded {
            Ok(result) => result,
            Err(payload) => Err(SdkError::TransformFailed {
                transformer: self.name.clone(),
                message: panic_message(payload.as_ref()),
            }),
        }
    }

    /// Transform `value`, falling back to an unmodified copy on failure
    pub fn transform(&self, value: &T) -> T {
        match self.try_transform(value) {
            Ok(transformed) => transformed,
            Err(e) => {
                tracing::warn!(
                    transformer = %self.name,
                    "Transformation failed, returning original value: {}",
                    e
                );
                value.clone()
            }
        }
    }

    /// Transform an optional value; absent stays absent
    pub fn transform_optional(&self, value: Option<&T>) -> Option<T> {
        value.map(|v| self.transform(v))
    }

    /// Transform and report whether the value changed
    ///
    /// Absent value or a failed transformation yields `Error`; a changed
    /// value `Match`; an unchanged one `NoMatch`.
    pub fn transform_with_result(&self, value: Option<&T>) -> RuleResult {
        let Some(value) = value else {
            return RuleResult::error(&self.name, "Value is null");
        };

        match self.try_transform(value) {
            Ok(transformed) if transformed != *value => {
                RuleResult::matched(&self.name, "Value transformed successfully")
            }
            Ok(_) => RuleResult::no_match(),
            Err(e) => {
                tracing::warn!(transformer = %self.name, "Transformation failed: {}", e);
                RuleResult::error(&self.name, format!("Transformation failed: {}", e))
            }
        }
    }

    fn transform_copy(&self, original: &T) -> Result<T> {
        let mut copy = original.clone();
        if self.transformer_rules.is_empty() {
            return Ok(copy);
        }

        let bound = Value::from_serialize(original)?;

        for transformer_rule in &self.transformer_rules {
            let rule = transformer_rule.rule();

            let mut facts = FactContext::new().with_fact(VALUE_FACT, bound.clone());
            facts.extend(transformer_rule.additional_facts().clone());

            let result = self
                .rules_engine
                .execute_rules_list(std::slice::from_ref(rule), &facts);

            let actions = if result.is_triggered() {
                tracing::debug!(transformer = %self.name, rule = %rule.name(), "rule triggered, applying positive actions");
                transformer_rule.positive_actions()
            } else {
                if result.is_error() {
                    tracing::warn!(transformer = %self.name, rule = %rule.name(), "rule failed: {}", result);
                }
                tracing::debug!(transformer = %self.name, rule = %rule.name(), "rule not triggered, applying negative actions");
                transformer_rule.negative_actions()
            };

            for action in actions {
                self.apply_action(action, original, &mut copy, &facts);
            }
        }

        Ok(copy)
    }

    /// Run one action against a staged copy and commit it only on success
    fn apply_action(&self, action: &FieldAction<T>, original: &T, copy: &mut T, facts: &FactContext) {
        let mut staged = copy.clone();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            action.run(original, &mut staged, facts)
        }));

        match outcome {
            Ok(Ok(())) => *copy = staged,
            Ok(Err(e)) => {
                tracing::warn!(
                    transformer = %self.name,
                    field = %action.field_name(),
                    "Error applying field action: {:#}",
                    e
                );
            }
            Err(payload) => {
                tracing::warn!(
                    transformer = %self.name,
                    field = %action.field_name(),
                    "Field action panicked: {}",
                    panic_message(payload.as_ref())
                );
            }
        }
    }
}

impl<T> fmt::Debug for GenericTransformer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericTransformer")
            .field("name", &self.name)
            .field("transformer_rules", &self.transformer_rules)
            .finish()
    }
}
