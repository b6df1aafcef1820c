//! Binary operator execution

use crate::error::{Result, RuntimeError};
use regex::Regex;
use ruleforge_core::ast::Operator;
use ruleforge_core::Value;

/// Execute an arithmetic, logical or `matches` operation
///
/// Comparisons go through [`super::execute_compare`]; `&&` and `||` are
/// short-circuited by the interpreter and only reach here with both sides
/// already evaluated.
pub(crate) fn execute_binary_op(left: &Value, op: &Operator, right: &Value) -> Result<Value> {
    match (left, op, right) {
        // String concatenation, either side a string
        (Value::String(l), Operator::Add, r) => Ok(Value::String(format!("{}{}", l, r))),
        (l, Operator::Add, Value::String(r)) => Ok(Value::String(format!("{}{}", l, r))),

        // Arithmetic operations
        (Value::Number(l), Operator::Add, Value::Number(r)) => Ok(Value::Number(l + r)),
        (Value::Number(l), Operator::Sub, Value::Number(r)) => Ok(Value::Number(l - r)),
        (Value::Number(l), Operator::Mul, Value::Number(r)) => Ok(Value::Number(l * r)),
        (Value::Number(l), Operator::Div, Value::Number(r)) => {
            if *r == 0.0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                Ok(Value::Number(l / r))
            }
        }
        (Value::Number(l), Operator::Mod, Value::Number(r)) => {
            if *r == 0.0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                Ok(Value::Number(l % r))
            }
        }

        // Logical operations
        (Value::Bool(l), Operator::And, Value::Bool(r)) => Ok(Value::Bool(*l && *r)),
        (Value::Bool(l), Operator::Or, Value::Bool(r)) => Ok(Value::Bool(*l || *r)),

        (Value::String(text), Operator::Matches, Value::String(pattern)) => {
            Ok(Value::Bool(full_match(text, pattern)?))
        }

        (Value::Null, _, _) | (_, _, Value::Null) => Err(RuntimeError::TypeError(format!(
            "Cannot apply {} to {} and {}",
            op,
            left.kind(),
            right.kind()
        ))),

        _ => Err(RuntimeError::InvalidOperation(format!(
            "Cannot apply {} to {} and {}",
            op,
            left.kind(),
            right.kind()
        ))),
    }
}

/// `matches` tests the whole string against the pattern
fn full_match(text: &str, pattern: &str) -> Result<bool> {
    let anchored = format!("^(?:{})$", pattern);
    let regex = Regex::new(&anchored).map_err(|e| RuntimeError::InvalidRegex {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;
    Ok(regex.is_match(text))
}
