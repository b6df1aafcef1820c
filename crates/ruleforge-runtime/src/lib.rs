//! RuleForge Runtime - expression evaluation and rule orchestration
//!
//! This crate provides the pluggable expression runtime seam, the built-in
//! interpreter, the evaluation facade and the rules engine that turns
//! conditions into rule results.

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod rules_engine;

// Re-export main types
pub use config::RulesEngineConfig;
pub use engine::DefaultRuntime;
pub use error::{Result, RuntimeError};
pub use evaluator::{ExpressionEvaluator, ExpressionRuntime};
pub use rules_engine::{panic_message, RulesEngine};
