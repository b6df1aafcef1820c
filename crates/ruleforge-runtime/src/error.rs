//! Runtime error types

use ruleforge_core::ValueKind;
use ruleforge_parser::ParseError;
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Condition text could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// `#name` has no binding in the fact context
    #[error("Undefined variable: #{0}")]
    UndefinedVariable(String),

    /// Dependency pre-validation found a fact the condition needs
    #[error("Missing required fact: {0}")]
    MissingFact(String),

    /// Result or operand of the wrong kind
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: ValueKind, actual: ValueKind },

    /// Type error
    #[error("Type error: {0}")]
    TypeError(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Method not available on the target value
    #[error("Unknown method '{method}' on {target}")]
    UnknownMethod { method: String, target: ValueKind },

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Pattern given to `matches` is not a valid regex
    #[error("Invalid regex '{pattern}': {message}")]
    InvalidRegex { pattern: String, message: String },
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
