//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Empty condition text
    #[error("Empty expression")]
    EmptyExpression,

    /// Character the tokenizer does not understand
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    /// String literal without closing quote
    #[error("Unterminated string literal starting at position {0}")]
    UnterminatedString(usize),

    /// Malformed number literal
    #[error("Invalid number literal '{0}'")]
    InvalidNumber(String),

    /// Token that does not fit the grammar at this point
    #[error("Unexpected token '{found}' at position {position}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        position: usize,
    },

    /// Input ended while more tokens were required
    #[error("Unexpected end of expression, expected {0}")]
    UnexpectedEnd(String),

    /// Condition nested past the parser's depth limit
    #[error("Expression nested deeper than {limit} levels at position {position}")]
    NestingTooDeep { limit: usize, position: usize },
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ParseError::UnexpectedToken {
            found: ")".to_string(),
            expected: "expression".to_string(),
            position: 4,
        };
        assert_eq!(
            err.to_string(),
            "Unexpected token ')' at position 4, expected expression"
        );
        assert_eq!(
            ParseError::UnexpectedEnd("')'".to_string()).to_string(),
            "Unexpected end of expression, expected ')'"
        );
        assert_eq!(
            ParseError::NestingTooDeep { limit: 64, position: 70 }.to_string(),
            "Expression nested deeper than 64 levels at position 70"
        );
    }
}
