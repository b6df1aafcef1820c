//! RuleForge Core - Core types and definitions for the RuleForge rule engine
//!
//! This crate provides the fundamental types used across the RuleForge crates:
//! - Value types for facts and expression results
//! - Condition AST definitions
//! - Rule, rule set and result model
//! - Error types

pub mod ast;
pub mod error;
pub mod model;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use model::{FactContext, Outcome, ResultType, Rule, RuleResult, RuleSet};
pub use types::{Value, ValueKind};
