//! Rule evaluation orchestrator
//!
//! Evaluates rules against one fact context. A failure in one rule becomes
//! that rule's `Error` result and never stops the remaining rules.

use crate::config::RulesEngineConfig;
use crate::error::RuntimeError;
use crate::evaluator::{ExpressionEvaluator, ExpressionRuntime};
use ruleforge_core::{FactContext, Rule, RuleResult, RuleSet};
use ruleforge_parser::DependencyExtractor;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Rules engine
#[derive(Debug, Clone, Default)]
pub struct RulesEngine {
    evaluator: ExpressionEvaluator,
    config: RulesEngineConfig,
}

impl RulesEngine {
    /// Create a rules engine over the default runtime
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rules engine over a custom expression runtime
    pub fn with_runtime(runtime: Arc<dyn ExpressionRuntime>) -> Self {
        Self {
            evaluator: ExpressionEvaluator::new(runtime),
            config: RulesEngineConfig::default(),
        }
    }

    /// Set the engine configuration
    pub fn with_config(mut self, config: RulesEngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RulesEngineConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &ExpressionEvaluator {
        &self.evaluator
    }

    /// Evaluate a single rule
    pub fn evaluate_rule(&self, rule: &Rule, facts: &FactContext) -> RuleResult {
        tracing::debug!("Evaluating rule: {}", rule.name());

        let result = self.outcome(rule, facts);

        tracing::debug!(
            "Rule '{}' evaluated, result type: {}",
            rule.name(),
            result.result_type()
        );
        if self.config.log_results {
            tracing::info!("{}: {}", rule.name(), rule.message());
            tracing::info!("Result type: {}", result.result_type());
        }

        result
    }

    fn outcome(&self, rule: &Rule, facts: &FactContext) -> RuleResult {
        if rule.is_always_true() {
            return RuleResult::matched(rule.name(), rule.message());
        }

        if self.config.validate_dependencies {
            if let Some(missing) = DependencyExtractor::missing_facts(rule.condition(), facts)
                .into_iter()
                .next()
            {
                let error = RuntimeError::MissingFact(missing);
                tracing::warn!("Rule '{}' not evaluated: {}", rule.name(), error);
                return RuleResult::error(rule.name(), error.to_string());
            }
        }

        let evaluated = panic::catch_unwind(AssertUnwindSafe(|| {
            self.evaluator.evaluate_bool(rule.condition(), facts)
        }));

        match evaluated {
            Ok(Ok(true)) => RuleResult::matched(rule.name(), rule.message()),
            Ok(Ok(false)) => RuleResult::no_match(),
            Ok(Err(e)) => {
                tracing::warn!("Error evaluating rule '{}': {}", rule.name(), e);
                RuleResult::error(rule.name(), format!("Error evaluating expression: {}", e))
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!("Expression runtime panicked on rule '{}': {}", rule.name(), message);
                RuleResult::error(
                    rule.name(),
                    format!("Error evaluating expression: runtime panicked: {}", message),
                )
            }
        }
    }

    /// Evaluate every rule, returning one result per rule in input order
    pub fn evaluate_rules(&self, rules: &[Rule], facts: &FactContext) -> Vec<RuleResult> {
        tracing::info!("Evaluating {} rules", rules.len());

        if rules.is_empty() {
            tracing::info!("No rules to evaluate");
            return Vec::new();
        }

        let results: Vec<RuleResult> = rules
            .iter()
            .map(|rule| self.evaluate_rule(rule, facts))
            .collect();

        let errors = results.iter().filter(|r| r.is_error()).count();
        tracing::info!(
            "Evaluated {} rules ({} matched, {} errors)",
            results.len(),
            results.iter().filter(|r| r.is_triggered()).count(),
            errors
        );
        results
    }

    /// Evaluate rules in priority order and collapse to one result
    ///
    /// Returns `NoRules` for an empty list, the first `Match` if any rule
    /// fired, otherwise the first `Error` if any rule failed, otherwise
    /// `NoMatch`.
    pub fn execute_rules_list(&self, rules: &[Rule], facts: &FactContext) -> RuleResult {
        if rules.is_empty() {
            tracing::debug!("Empty rule list");
            return RuleResult::no_rules();
        }

        let mut ordered: Vec<&Rule> = rules.iter().collect();
        ordered.sort_by_key(|r| (r.priority().is_none(), r.priority()));

        let mut first_match = None;
        let mut first_error = None;

        for rule in ordered {
            let result = self.evaluate_rule(rule, facts);
            if result.is_triggered() {
                if self.config.stop_on_first_match {
                    return result;
                }
                first_match.get_or_insert(result);
            } else if result.is_error() {
                first_error.get_or_insert(result);
            }
        }

        first_match
            .or(first_error)
            .unwrap_or_else(RuleResult::no_match)
    }

    /// Evaluate a rule set in priority order and collapse to one result
    pub fn execute_rule_set(&self, rule_set: &RuleSet, facts: &FactContext) -> RuleResult {
        tracing::debug!(
            "Executing rule set '{}' ({} rules)",
            rule_set.name(),
            rule_set.len()
        );
        self.execute_rules_list(rule_set.rules(), facts)
    }

    /// Evaluate a bare condition; failures count as `false`
    pub fn check(&self, condition: &str, facts: &FactContext) -> bool {
        if condition.trim().is_empty() {
            return true;
        }
        match self.evaluator.evaluate_bool(condition, facts) {
            Ok(triggered) => triggered,
            Err(e) => {
                tracing::warn!("Error checking condition '{}': {}", condition, e);
                false
            }
        }
    }
}

/// Text of a caught panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
