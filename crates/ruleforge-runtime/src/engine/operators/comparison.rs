//! Comparison operator execution

use crate::error::{Result, RuntimeError};
use ruleforge_core::ast::Operator;
use ruleforge_core::Value;
use std::cmp::Ordering;

/// Execute a comparison operation
pub(crate) fn execute_compare(left: &Value, op: &Operator, right: &Value) -> Result<bool> {
    match op {
        Operator::Eq => Ok(values_equal(left, right)),
        Operator::Ne => Ok(!values_equal(left, right)),
        Operator::Gt | Operator::Ge | Operator::Lt | Operator::Le => {
            let ordering = order(left, op, right)?;
            Ok(match op {
                Operator::Gt => ordering == Ordering::Greater,
                Operator::Ge => ordering != Ordering::Less,
                Operator::Lt => ordering == Ordering::Less,
                _ => ordering != Ordering::Greater,
            })
        }
        _ => Err(RuntimeError::InvalidOperation(format!(
            "{} is not a comparison operator",
            op
        ))),
    }
}

/// Equality across kinds is false rather than an error; `null == null` holds
pub(crate) fn values_equal(left: &Value, right: &Value) -> bool {
    left == right
}

fn order(left: &Value, op: &Operator, right: &Value) -> Result<Ordering> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => l.partial_cmp(r).ok_or_else(|| {
            RuntimeError::InvalidOperation(format!("Cannot order NaN with {}", op))
        }),
        (Value::String(l), Value::String(r)) => Ok(l.cmp(r)),
        (Value::Bool(l), Value::Bool(r)) => Ok(l.cmp(r)),
        (Value::Null, _) | (_, Value::Null) => {
            tracing::debug!("Null ordering comparison: {} {} {}", left, op, right);
            Err(RuntimeError::TypeError(format!(
                "Cannot compare {} with {} using {}",
                left.kind(),
                right.kind(),
                op
            )))
        }
        _ => Err(RuntimeError::InvalidOperation(format!(
            "Cannot compare {} and {} with {}",
            left.kind(),
            right.kind(),
            op
        ))),
    }
}
