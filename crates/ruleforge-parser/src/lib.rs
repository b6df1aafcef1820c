//! RuleForge Parser - condition text to AST
//!
//! This crate turns condition strings into `ruleforge_core::ast::Expression`
//! trees and provides a lightweight static scan of the facts a condition
//! depends on.

pub mod dependency;
pub mod error;
pub mod expression_parser;
pub mod lexer;

// Re-export main parser types
pub use dependency::{DependencyExtractor, FactReference};
pub use error::{ParseError, Result};
pub use expression_parser::{ExpressionParser, MAX_NESTING_DEPTH};
