//! Rules engine configuration

use serde::{Deserialize, Serialize};

/// Behaviour switches for [`crate::RulesEngine`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesEngineConfig {
    /// Log `"<rule>: <message>"` and the result type for every evaluated rule
    pub log_results: bool,

    /// Check a condition's `#fact` references against the context before
    /// evaluating it
    pub validate_dependencies: bool,

    /// Stop `execute_rules_list` at the first matching rule
    pub stop_on_first_match: bool,
}

impl Default for RulesEngineConfig {
    fn default() -> Self {
        Self {
            log_results: false,
            validate_dependencies: false,
            stop_on_first_match: true,
        }
    }
}

impl RulesEngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log_results(mut self, enabled: bool) -> Self {
        self.log_results = enabled;
        self
    }

    pub fn with_validate_dependencies(mut self, enabled: bool) -> Self {
        self.validate_dependencies = enabled;
        self
    }

    pub fn with_stop_on_first_match(mut self, enabled: bool) -> Self {
        self.stop_on_first_match = enabled;
        self
    }
}
