//! SDK error types

use crate::registry::LookupError;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Core model error
    #[error("Core error: {0}")]
    CoreError(#[from] ruleforge_core::CoreError),

    /// Parser error
    #[error("Parser error: {0}")]
    ParseError(#[from] ruleforge_parser::ParseError),

    /// Runtime error
    #[error("Runtime error: {0}")]
    RuntimeError(#[from] ruleforge_runtime::RuntimeError),

    /// Named service missing or of another type
    #[error("Lookup error: {0}")]
    LookupError(#[from] LookupError),

    /// Transformation aborted before producing a copy
    #[error("Transformer '{transformer}' failed: {message}")]
    TransformFailed { transformer: String, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
