//! Expression AST nodes

use super::operator::Operator;
use crate::types::Value;
use serde::{Deserialize, Serialize};

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Literal value
    Literal(Value),

    /// Fact reference (e.g., #trade, #threshold)
    Variable(String),

    /// The implicit root object (#root, #this)
    Root,

    /// Property access (e.g., #trade.value, #customer?.address)
    Property {
        target: Box<Expression>,
        name: String,
        /// `?.` navigation yields null instead of failing on a null target
        null_safe: bool,
    },

    /// Index access (e.g., #items[0], #limits['EUR'])
    Index {
        target: Box<Expression>,
        index: Box<Expression>,
    },

    /// Method call on a value (e.g., #name.length(), #email.contains('@'))
    MethodCall {
        target: Box<Expression>,
        name: String,
        args: Vec<Expression>,
        null_safe: bool,
    },

    /// Binary operation
    Binary {
        left: Box<Expression>,
        op: Operator,
        right: Box<Expression>,
    },

    /// Unary operation
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// Ternary conditional (condition ? true_expr : false_expr)
    Ternary {
        condition: Box<Expression>,
        true_expr: Box<Expression>,
        false_expr: Box<Expression>,
    },

    /// Elvis operator (value ?: fallback)
    Elvis {
        value: Box<Expression>,
        fallback: Box<Expression>,
    },

    /// Inline list ({1, 2, 3})
    List(Vec<Expression>),
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    /// Logical NOT (!, not)
    Not,
    /// Arithmetic negation (-)
    Negate,
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    /// Create a variable reference
    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable(name.into())
    }

    /// Create a property access expression
    pub fn property(target: Expression, name: impl Into<String>) -> Self {
        Expression::Property {
            target: Box::new(target),
            name: name.into(),
            null_safe: false,
        }
    }

    /// Create a binary expression
    pub fn binary(left: Expression, op: Operator, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Create a method call expression
    pub fn method_call(target: Expression, name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::MethodCall {
            target: Box::new(target),
            name: name.into(),
            args,
            null_safe: false,
        }
    }

    /// Create a unary expression
    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Create a ternary expression
    pub fn ternary(condition: Expression, true_expr: Expression, false_expr: Expression) -> Self {
        Expression::Ternary {
            condition: Box::new(condition),
            true_expr: Box::new(true_expr),
            false_expr: Box::new(false_expr),
        }
    }

    /// Collect the names of all variables referenced by this expression,
    /// in first-seen order without duplicates
    pub fn variables(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables(&self, names: &mut Vec<String>) {
        match self {
            Expression::Variable(name) => {
                if !names.iter().any(|n| n == name) {
                    names.push(name.clone());
                }
            }
            Expression::Literal(_) | Expression::Root => {}
            Expression::Property { target, .. } => target.collect_variables(names),
            Expression::Index { target, index } => {
                target.collect_variables(names);
                index.collect_variables(names);
            }
            Expression::MethodCall { target, args, .. } => {
                target.collect_variables(names);
                for arg in args {
                    arg.collect_variables(names);
                }
            }
            Expression::Binary { left, right, .. } => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
            Expression::Unary { operand, .. } => operand.collect_variables(names),
            Expression::Ternary {
                condition,
                true_expr,
                false_expr,
            } => {
                condition.collect_variables(names);
                true_expr.collect_variables(names);
                false_expr.collect_variables(names);
            }
            Expression::Elvis { value, fallback } => {
                value.collect_variables(names);
                fallback.collect_variables(names);
            }
            Expression::List(items) => {
                for item in items {
                    item.collect_variables(names);
                }
            }
        }
    }
}
