//! RuleForge SDK
//!
//! High-level API for rule-driven validation and transformation: a named
//! service registry, the validation and transformer services built on it,
//! and the generic copy-then-mutate transformer.

pub mod builder;
pub mod config;
pub mod error;
pub mod registry;
pub mod transform;
pub mod transformer_service;
pub mod validation;

// Re-export main types
pub use builder::{RuleForge, RuleForgeBuilder};
pub use config::EngineConfig;
pub use error::{Result, SdkError};
pub use registry::{LookupError, ServiceRegistry};
pub use transform::{
    field_action, FieldAction, FieldActionBuilder, GenericTransformer, Transformable, TransformerRule,
    VALUE_FACT,
};
pub use transformer_service::{TransformerService, DYNAMIC_TRANSFORMER, LOOKUP_DATA_FACT};
pub use validation::{FnValidator, RuleValidator, SharedValidator, ValidationService, Validator};

// Re-export commonly used types from dependencies
pub use ruleforge_core::{FactContext, ResultType, Rule, RuleResult, RuleSet, Value};
pub use ruleforge_runtime::{ExpressionRuntime, RulesEngine, RulesEngineConfig};
