//! Default expression runtime
//!
//! Tree-walking interpreter over the parsed condition AST. Variables resolve
//! against the fact context, `#root` / `#this` and bare identifiers against
//! the context's root object.

use super::methods::call_method;
use super::operators::{execute_binary_op, execute_compare, execute_unary_op};
use crate::error::{Result, RuntimeError};
use crate::evaluator::ExpressionRuntime;
use ruleforge_core::ast::{Expression, Operator};
use ruleforge_core::{FactContext, Value, ValueKind};
use ruleforge_parser::ExpressionParser;

/// Built-in interpreter used when no custom runtime is supplied
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRuntime;

impl DefaultRuntime {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate an already parsed expression
    pub fn evaluate_expression(&self, expr: &Expression, facts: &FactContext) -> Result<Value> {
        match expr {
            Expression::Literal(value) => Ok(value.clone()),

            Expression::Variable(name) => facts
                .get(name)
                .cloned()
                .ok_or_else(|| RuntimeError::UndefinedVariable(name.clone())),

            Expression::Root => Ok(facts.root().cloned().unwrap_or(Value::Null)),

            Expression::Property {
                target,
                name,
                null_safe,
            } => {
                let target = self.evaluate_expression(target, facts)?;
                read_property(&target, name, *null_safe)
            }

            Expression::Index { target, index } => {
                let target = self.evaluate_expression(target, facts)?;
                let index = self.evaluate_expression(index, facts)?;
                read_index(&target, &index)
            }

            Expression::MethodCall {
                target,
                name,
                args,
                null_safe,
            } => {
                let target = self.evaluate_expression(target, facts)?;
                if target.is_null() && *null_safe {
                    return Ok(Value::Null);
                }
                let args = args
                    .iter()
                    .map(|arg| self.evaluate_expression(arg, facts))
                    .collect::<Result<Vec<_>>>()?;
                call_method(&target, name, &args)
            }

            Expression::Binary { left, op, right } => match op {
                // Short-circuit logical operators
                Operator::And => {
                    if !as_logic(&self.evaluate_expression(left, facts)?, op)? {
                        return Ok(Value::Bool(false));
                    }
                    Ok(Value::Bool(as_logic(&self.evaluate_expression(right, facts)?, op)?))
                }
                Operator::Or => {
                    if as_logic(&self.evaluate_expression(left, facts)?, op)? {
                        return Ok(Value::Bool(true));
                    }
                    Ok(Value::Bool(as_logic(&self.evaluate_expression(right, facts)?, op)?))
                }
                _ => {
                    let left = self.evaluate_expression(left, facts)?;
                    let right = self.evaluate_expression(right, facts)?;
                    if op.is_comparison() {
                        execute_compare(&left, op, &right).map(Value::Bool)
                    } else {
                        execute_binary_op(&left, op, &right)
                    }
                }
            },

            Expression::Unary { op, operand } => {
                let operand = self.evaluate_expression(operand, facts)?;
                execute_unary_op(&operand, op)
            }

            Expression::Ternary {
                condition,
                true_expr,
                false_expr,
            } => match self.evaluate_expression(condition, facts)? {
                Value::Bool(true) => self.evaluate_expression(true_expr, facts),
                Value::Bool(false) => self.evaluate_expression(false_expr, facts),
                other => Err(RuntimeError::TypeMismatch {
                    expected: ValueKind::Bool,
                    actual: other.kind(),
                }),
            },

            Expression::Elvis { value, fallback } => {
                let value = self.evaluate_expression(value, facts)?;
                if value.is_null() {
                    self.evaluate_expression(fallback, facts)
                } else {
                    Ok(value)
                }
            }

            Expression::List(items) => Ok(Value::Array(
                items
                    .iter()
                    .map(|item| self.evaluate_expression(item, facts))
                    .collect::<Result<Vec<_>>>()?,
            )),
        }
    }
}

impl ExpressionRuntime for DefaultRuntime {
    fn evaluate(&self, condition: &str, facts: &FactContext) -> Result<Value> {
        let expr = ExpressionParser::parse(condition)?;
        self.evaluate_expression(&expr, facts)
    }
}

fn as_logic(value: &Value, op: &Operator) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(RuntimeError::TypeError(format!(
            "Operand of {} must be bool, got {}",
            op,
            other.kind()
        ))),
    }
}

fn read_property(target: &Value, name: &str, null_safe: bool) -> Result<Value> {
    match target {
        Value::Object(map) => {
            let value = map.get(name).cloned().unwrap_or_else(|| {
                tracing::debug!("Property not found: {}, returning Null", name);
                Value::Null
            });
            Ok(value)
        }
        Value::Null if null_safe => Ok(Value::Null),
        Value::Null => Err(RuntimeError::TypeError(format!(
            "Cannot read property '{}' of null",
            name
        ))),
        other => Err(RuntimeError::InvalidOperation(format!(
            "Cannot read property '{}' of {}",
            name,
            other.kind()
        ))),
    }
}

fn read_index(target: &Value, index: &Value) -> Result<Value> {
    match (target, index) {
        (Value::Array(items), Value::Number(n)) => position(*n, items.len())
            .and_then(|i| items.get(i).cloned())
            .ok_or_else(|| {
                RuntimeError::InvalidOperation(format!(
                    "Index {} out of bounds for length {}",
                    index,
                    items.len()
                ))
            }),
        (Value::String(s), Value::Number(n)) => {
            let chars: Vec<char> = s.chars().collect();
            position(*n, chars.len())
                .map(|i| Value::String(chars[i].to_string()))
                .ok_or_else(|| {
                    RuntimeError::InvalidOperation(format!(
                        "Index {} out of bounds for length {}",
                        index,
                        chars.len()
                    ))
                })
        }
        (Value::Object(map), Value::String(key)) => Ok(map.get(key).cloned().unwrap_or(Value::Null)),
        (Value::Null, _) => Err(RuntimeError::TypeError(format!(
            "Cannot index null with {}",
            index
        ))),
        _ => Err(RuntimeError::InvalidOperation(format!(
            "Cannot index {} with {}",
            target.kind(),
            index.kind()
        ))),
    }
}

fn position(n: f64, len: usize) -> Option<usize> {
    if n >= 0.0 && n.fract() == 0.0 && (n as usize) < len {
        Some(n as usize)
    } else {
        None
    }
}
