//! Configuration types for RuleForge

use crate::error::{Result, SdkError};
use ruleforge_runtime::RulesEngineConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
///
/// ```yaml
/// engine:
///   log_results: true
///   stop_on_first_match: false
/// fail_open: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rules engine behaviour
    pub engine: RulesEngineConfig,

    /// Whether a transformer lookup failure returns the value unchanged
    /// instead of an error
    pub fail_open: bool,
}

impl EngineConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            engine: RulesEngineConfig::default(),
            fail_open: true,
        }
    }

    /// Parse a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a JSON document
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load from a `.yaml`, `.yml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            Some("json") => Self::from_json(&content),
            _ => Err(SdkError::ConfigError(format!(
                "unsupported config file extension: {}",
                path.display()
            ))),
        }
    }

    /// Set the rules engine configuration
    pub fn with_engine(mut self, engine: RulesEngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Set fail-open behaviour for transformer lookups
    pub fn with_fail_open(mut self, fail_open: bool) -> Self {
        self.fail_open = fail_open;
        self
    }

    /// Log every evaluated rule
    pub fn with_log_results(mut self, enabled: bool) -> Self {
        self.engine.log_results = enabled;
        self
    }

    /// Check fact references before evaluating
    pub fn with_validate_dependencies(mut self, enabled: bool) -> Self {
        self.engine.validate_dependencies = enabled;
        self
    }

    /// Stop list execution at the first match
    pub fn with_stop_on_first_match(mut self, enabled: bool) -> Self {
        self.engine.stop_on_first_match = enabled;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
