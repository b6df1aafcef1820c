//! Expression evaluation facade
//!
//! [`ExpressionRuntime`] is the seam to whatever evaluates condition text;
//! [`ExpressionEvaluator`] wraps a runtime with typed and result-producing
//! entry points used by the rules engine.

use crate::engine::DefaultRuntime;
use crate::error::{Result, RuntimeError};
use ruleforge_core::{FactContext, RuleResult, Value, ValueKind};
use std::fmt;
use std::sync::Arc;

/// Capability that evaluates condition text against a fact context
///
/// Implementations must be shareable across threads. Evaluation is not
/// assumed to be pure: a condition may call a side-effecting method.
pub trait ExpressionRuntime: Send + Sync {
    /// Evaluate `condition`, yielding a value or an evaluation failure
    fn evaluate(&self, condition: &str, facts: &FactContext) -> Result<Value>;
}

impl<F> ExpressionRuntime for F
where
    F: Fn(&str, &FactContext) -> Result<Value> + Send + Sync,
{
    fn evaluate(&self, condition: &str, facts: &FactContext) -> Result<Value> {
        self(condition, facts)
    }
}

/// Facade over an [`ExpressionRuntime`]
#[derive(Clone)]
pub struct ExpressionEvaluator {
    runtime: Arc<dyn ExpressionRuntime>,
}

impl ExpressionEvaluator {
    pub fn new(runtime: Arc<dyn ExpressionRuntime>) -> Self {
        Self { runtime }
    }

    /// Evaluate a condition, yielding whatever value it produces
    pub fn evaluate(&self, condition: &str, facts: &FactContext) -> Result<Value> {
        self.runtime.evaluate(condition, facts)
    }

    /// Evaluate a condition and require a result of `expected` kind
    ///
    /// `null` is accepted for any expected kind.
    pub fn evaluate_as(
        &self,
        condition: &str,
        facts: &FactContext,
        expected: ValueKind,
    ) -> Result<Value> {
        let value = self.evaluate(condition, facts)?;
        if value.is_null() || value.kind() == expected {
            Ok(value)
        } else {
            Err(RuntimeError::TypeMismatch {
                expected,
                actual: value.kind(),
            })
        }
    }

    /// Evaluate a condition as a predicate
    ///
    /// `true` triggers; `false` and `null` do not; any other kind is a type
    /// mismatch.
    pub fn evaluate_bool(&self, condition: &str, facts: &FactContext) -> Result<bool> {
        let value = self.evaluate_as(condition, facts, ValueKind::Bool)?;
        Ok(value.as_bool().unwrap_or(false))
    }

    /// Evaluate a condition into a [`RuleResult`]
    ///
    /// The condition text stands in for the rule name. Failures become an
    /// `Error` result rather than propagating.
    pub fn evaluate_with_result(&self, condition: &str, facts: &FactContext) -> RuleResult {
        match self.evaluate_bool(condition, facts) {
            Ok(true) => RuleResult::matched(condition, "Expression evaluated to true"),
            Ok(false) => RuleResult::no_match(),
            Err(e) => {
                tracing::warn!("Error evaluating expression '{}': {}", condition, e);
                RuleResult::error(condition, format!("Error evaluating expression: {}", e))
            }
        }
    }
}

impl Default for ExpressionEvaluator {
    fn default() -> Self {
        Self::new(Arc::new(DefaultRuntime::new()))
    }
}

impl fmt::Debug for ExpressionEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpressionEvaluator").finish_non_exhaustive()
    }
}
