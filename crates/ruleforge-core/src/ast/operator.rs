//! Binary operators of the condition language

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    /// Numeric addition, or concatenation when either side is a string
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    /// Short-circuit conjunction, `&&` or `and`
    And,
    /// Short-circuit disjunction, `||` or `or`
    Or,
    /// Full-string regex match
    Matches,
}

/// Operator class, used to route evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Comparison,
    Arithmetic,
    Logical,
    Pattern,
}

impl Operator {
    pub fn kind(&self) -> OperatorKind {
        use Operator::*;
        match self {
            Eq | Ne | Gt | Ge | Lt | Le => OperatorKind::Comparison,
            Add | Sub | Mul | Div | Mod => OperatorKind::Arithmetic,
            And | Or => OperatorKind::Logical,
            Matches => OperatorKind::Pattern,
        }
    }

    /// Equality or ordering comparison, always yielding a boolean
    pub fn is_comparison(&self) -> bool {
        self.kind() == OperatorKind::Comparison
    }

    /// Canonical source form
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Matches => "matches",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_kinds() {
        assert_eq!(Operator::Ge.kind(), OperatorKind::Comparison);
        assert_eq!(Operator::Mod.kind(), OperatorKind::Arithmetic);
        assert_eq!(Operator::Or.kind(), OperatorKind::Logical);
        assert_eq!(Operator::Matches.kind(), OperatorKind::Pattern);

        assert!(Operator::Ne.is_comparison());
        assert!(!Operator::Add.is_comparison());
        assert!(!Operator::Matches.is_comparison());
    }

    #[test]
    fn test_operator_display() {
        assert_eq!(Operator::Ge.to_string(), ">=");
        assert_eq!(Operator::And.to_string(), "&&");
        assert_eq!(Operator::Matches.to_string(), "matches");
    }
}
