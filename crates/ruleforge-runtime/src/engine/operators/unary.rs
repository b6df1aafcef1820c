//! Unary operator execution

use crate::error::{Result, RuntimeError};
use ruleforge_core::ast::UnaryOperator;
use ruleforge_core::Value;

/// Execute a unary operation
pub(crate) fn execute_unary_op(operand: &Value, op: &UnaryOperator) -> Result<Value> {
    match (op, operand) {
        (UnaryOperator::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOperator::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
        _ => Err(RuntimeError::InvalidOperation(format!(
            "Cannot apply {:?} to {}",
            op,
            operand.kind()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unary_ops() {
        assert_eq!(
            execute_unary_op(&Value::Bool(true), &UnaryOperator::Not).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            execute_unary_op(&Value::Number(3.0), &UnaryOperator::Negate).unwrap(),
            Value::Number(-3.0)
        );
        assert!(execute_unary_op(&Value::from("x"), &UnaryOperator::Not).is_err());
    }
}
