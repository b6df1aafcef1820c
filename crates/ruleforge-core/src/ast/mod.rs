//! Abstract Syntax Tree (AST) definitions for RuleForge conditions
//!
//! Condition text is parsed into these nodes by `ruleforge-parser` and
//! interpreted by the default runtime in `ruleforge-runtime`.

pub mod expression;
pub mod operator;

pub use expression::{Expression, UnaryOperator};
pub use operator::{Operator, OperatorKind};
