//! Transformer service
//!
//! Looks transformers up by name in the shared [`ServiceRegistry`] and runs
//! them. Transformation never fails the caller by default: an unknown name
//! or a transformer registered for another type yields an unmodified copy.

use crate::error::Result;
use crate::registry::{LookupError, ServiceRegistry};
use crate::transform::{FieldAction, GenericTransformer, Transformable, TransformerRule, VALUE_FACT};
use ruleforge_core::{FactContext, Rule, RuleResult, Value};
use ruleforge_runtime::RulesEngine;
use std::collections::HashMap;
use std::sync::Arc;

/// Name given to transformers built on the fly by `transform_with_rules`
pub const DYNAMIC_TRANSFORMER: &str = "DynamicTransformer";

/// Fact bound to the lookup data in [`TransformerService::apply_rule_condition_with_lookup`]
pub const LOOKUP_DATA_FACT: &str = "lookupData";

/// Registry-backed transformation entry point
#[derive(Debug, Clone)]
pub struct TransformerService {
    registry: ServiceRegistry,
    rules_engine: RulesEngine,
    fail_open: bool,
}

impl TransformerService {
    pub fn new(registry: ServiceRegistry, rules_engine: RulesEngine) -> Self {
        Self {
            registry,
            rules_engine,
            fail_open: true,
        }
    }

    /// Choose whether [`TransformerService::try_transform`] treats a lookup
    /// failure as "return the value unchanged" (the default) or as an error
    pub fn with_fail_open(mut self, fail_open: bool) -> Self {
        self.fail_open = fail_open;
        self
    }

    pub fn fail_open(&self) -> bool {
        self.fail_open
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    pub fn rules_engine(&self) -> &RulesEngine {
        &self.rules_engine
    }

    /// Register a transformer under its own name
    pub fn register_transformer<T: Transformable>(&self, transformer: GenericTransformer<T>) -> Arc<GenericTransformer<T>> {
        let transformer = Arc::new(transformer);
        self.registry
            .register_shared(transformer.name().to_string(), Arc::clone(&transformer));
        transformer
    }

    /// Build a transformer over this service's rules engine and register it
    pub fn create_transformer<T: Transformable>(
        &self,
        name: impl Into<String>,
        transformer_rules: Vec<TransformerRule<T>>,
    ) -> Arc<GenericTransformer<T>> {
        let transformer = GenericTransformer::with_rules(name, self.rules_engine.clone(), transformer_rules);
        self.register_transformer(transformer)
    }

    /// Build and register a transformer holding exactly one rule
    pub fn create_single_rule_transformer<T: Transformable>(
        &self,
        name: impl Into<String>,
        rule: Rule,
        positive_actions: Vec<FieldAction<T>>,
        negative_actions: Vec<FieldAction<T>>,
        additional_facts: HashMap<String, Value>,
    ) -> Arc<GenericTransformer<T>> {
        let transformer_rule =
            TransformerRule::with_actions(rule, positive_actions, negative_actions, additional_facts);
        self.create_transformer(name, vec![transformer_rule])
    }

    /// Typed lookup of a registered transformer
    pub fn get_transformer<T: Transformable>(&self, name: &str) -> Result<Arc<GenericTransformer<T>>> {
        Ok(self.registry.lookup::<GenericTransformer<T>>(name)?)
    }

    /// Transform with the named transformer; a miss returns an unmodified copy
    pub fn transform<T: Transformable>(&self, name: &str, value: &T) -> T {
        match self.registry.lookup::<GenericTransformer<T>>(name) {
            Ok(transformer) => transformer.transform(value),
            Err(e) => {
                tracing::warn!("Transformer '{}' unavailable, returning original value: {}", name, e);
                value.clone()
            }
        }
    }

    /// Transform with the named transformer, surfacing failures
    ///
    /// Lookup failures are only errors when the service is not fail-open.
    pub fn try_transform<T: Transformable>(&self, name: &str, value: &T) -> Result<T> {
        match self.registry.lookup::<GenericTransformer<T>>(name) {
            Ok(transformer) => transformer.try_transform(value),
            Err(e) if self.fail_open => {
                tracing::warn!("Transformer '{}' unavailable, returning original value: {}", name, e);
                Ok(value.clone())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Transform with the named transformer and report the outcome
    pub fn transform_with_result<T: Transformable>(&self, name: &str, value: Option<&T>) -> RuleResult {
        match self.registry.lookup::<GenericTransformer<T>>(name) {
            Ok(transformer) => transformer.transform_with_result(value),
            Err(LookupError::NotFound(_)) => RuleResult::error(name, "Transformer not found"),
            Err(LookupError::TypeMismatch { .. }) => RuleResult::error(
                name,
                format!("Transformer cannot handle type: {}", std::any::type_name::<T>()),
            ),
        }
    }

    /// Transform with an unregistered transformer built from `transformer_rules`
    pub fn transform_with_rules<T: Transformable>(&self, value: &T, transformer_rules: Vec<TransformerRule<T>>) -> T {
        self.dynamic_transformer(transformer_rules).transform(value)
    }

    /// Like [`TransformerService::transform_with_rules`], reporting the outcome
    pub fn transform_with_rules_result<T: Transformable>(
        &self,
        value: Option<&T>,
        transformer_rules: Vec<TransformerRule<T>>,
    ) -> RuleResult {
        self.dynamic_transformer(transformer_rules).transform_with_result(value)
    }

    fn dynamic_transformer<T: Transformable>(&self, transformer_rules: Vec<TransformerRule<T>>) -> GenericTransformer<T> {
        GenericTransformer::with_rules(DYNAMIC_TRANSFORMER, self.rules_engine.clone(), transformer_rules)
    }

    /// Evaluate `rule` against `{"value": value} ∪ facts` and, if it
    /// triggers, transform with the named transformer
    pub fn apply_rule<T: Transformable>(
        &self,
        rule: &Rule,
        value: &T,
        facts: &HashMap<String, Value>,
        transformer_name: &str,
    ) -> T {
        let bound = match Value::from_serialize(value) {
            Ok(bound) => bound,
            Err(e) => {
                tracing::warn!(rule = %rule.name(), "Cannot bind value for rule: {}", e);
                return value.clone();
            }
        };

        let mut context = FactContext::new().with_fact(VALUE_FACT, bound);
        context.extend(facts.clone());

        let result = self.rules_engine.evaluate_rule(rule, &context);
        if result.is_triggered() {
            self.transform(transformer_name, value)
        } else {
            if result.is_error() {
                tracing::warn!(rule = %rule.name(), "Rule failed, value left unchanged: {}", result);
            }
            value.clone()
        }
    }

    /// [`TransformerService::apply_rule`] with a rule built from a bare condition
    pub fn apply_rule_condition<T: Transformable>(
        &self,
        condition: &str,
        value: &T,
        facts: &HashMap<String, Value>,
        transformer_name: &str,
    ) -> Result<T> {
        let rule = Rule::new(
            "Transformation Rule",
            condition,
            format!("Transformation rule with condition: {}", condition),
        )?;
        Ok(self.apply_rule(&rule, value, facts, transformer_name))
    }

    /// Condition variant binding `lookup_data` as `#lookupData`
    ///
    /// Conditions written against `#coreData` are read as `#value`.
    pub fn apply_rule_condition_with_lookup<T: Transformable>(
        &self,
        condition: &str,
        value: &T,
        lookup_data: impl Into<Value>,
        transformer_name: &str,
    ) -> Result<T> {
        let condition = condition.replace("#coreData", &format!("#{}", VALUE_FACT));
        let mut facts = HashMap::new();
        facts.insert(LOOKUP_DATA_FACT.to_string(), lookup_data.into());
        self.apply_rule_condition(&condition, value, &facts, transformer_name)
    }
}
