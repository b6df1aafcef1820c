//! Type system for RuleForge
//!
//! Runtime values and the kinds used for expected-type checks.

pub mod value;

pub use value::{Value, ValueKind};
