//! Expression engine module
//!
//! Provides the built-in interpreter for condition expressions.

pub mod interpreter;
mod methods;
mod operators;

// Re-export for convenience
pub use interpreter::DefaultRuntime;
