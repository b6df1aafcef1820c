//! Builder pattern for RuleForge

use crate::config::EngineConfig;
use crate::error::Result;
use crate::registry::ServiceRegistry;
use crate::transformer_service::TransformerService;
use crate::validation::ValidationService;
use ruleforge_runtime::{ExpressionRuntime, RulesEngine, RulesEngineConfig};
use std::path::Path;
use std::sync::Arc;

/// Builder for [`RuleForge`]
///
/// # Example
///
/// ```rust,ignore
/// use ruleforge_sdk::RuleForgeBuilder;
///
/// let forge = RuleForgeBuilder::new()
///     .with_log_results(true)
///     .with_fail_open(false)
///     .build();
///
/// forge.validation_service().validate("adult-customer", &customer);
/// ```
pub struct RuleForgeBuilder {
    config: EngineConfig,
    runtime: Option<Arc<dyn ExpressionRuntime>>,
    registry: Option<ServiceRegistry>,
}

impl RuleForgeBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            runtime: None,
            registry: None,
        }
    }

    /// Start from a configuration file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new().with_config(EngineConfig::from_file(path)?))
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the rules engine configuration
    pub fn with_engine_config(mut self, engine: RulesEngineConfig) -> Self {
        self.config.engine = engine;
        self
    }

    /// Evaluate conditions with a custom expression runtime
    pub fn with_runtime(mut self, runtime: Arc<dyn ExpressionRuntime>) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Share an existing registry instead of creating a fresh one
    pub fn with_registry(mut self, registry: ServiceRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Log every evaluated rule
    pub fn with_log_results(mut self, enabled: bool) -> Self {
        self.config.engine.log_results = enabled;
        self
    }

    /// Check fact references before evaluating
    pub fn with_validate_dependencies(mut self, enabled: bool) -> Self {
        self.config.engine.validate_dependencies = enabled;
        self
    }

    /// Stop list execution at the first match
    pub fn with_stop_on_first_match(mut self, enabled: bool) -> Self {
        self.config.engine.stop_on_first_match = enabled;
        self
    }

    /// Set fail-open behaviour for transformer lookups
    pub fn with_fail_open(mut self, fail_open: bool) -> Self {
        self.config.fail_open = fail_open;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Assemble the registry, the rules engine and both services
    pub fn build(self) -> RuleForge {
        let rules_engine = match self.runtime {
            Some(runtime) => RulesEngine::with_runtime(runtime),
            None => RulesEngine::new(),
        }
        .with_config(self.config.engine.clone());

        let registry = self.registry.unwrap_or_default();
        let validation = ValidationService::new(registry.clone(), rules_engine.clone());
        let transformers = TransformerService::new(registry.clone(), rules_engine.clone())
            .with_fail_open(self.config.fail_open);

        tracing::debug!(
            fail_open = self.config.fail_open,
            stop_on_first_match = self.config.engine.stop_on_first_match,
            "RuleForge assembled"
        );

        RuleForge {
            config: self.config,
            registry,
            rules_engine,
            validation,
            transformers,
        }
    }
}

impl Default for RuleForgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A registry with the services that share it
#[derive(Debug, Clone)]
pub struct RuleForge {
    config: EngineConfig,
    registry: ServiceRegistry,
    rules_engine: RulesEngine,
    validation: ValidationService,
    transformers: TransformerService,
}

impl RuleForge {
    pub fn builder() -> RuleForgeBuilder {
        RuleForgeBuilder::new()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    pub fn rules_engine(&self) -> &RulesEngine {
        &self.rules_engine
    }

    pub fn validation_service(&self) -> &ValidationService {
        &self.validation
    }

    pub fn transformer_service(&self) -> &TransformerService {
        &self.transformers
    }
}

impl Default for RuleForge {
    fn default() -> Self {
        RuleForgeBuilder::new().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FnValidator;
    use ruleforge_core::{FactContext, Value};
    use ruleforge_runtime::RuntimeError;

    #[test]
    fn test_builder_defaults() {
        let forge = RuleForgeBuilder::new().build();
        assert!(forge.transformer_service().fail_open());
        assert!(forge.registry().is_empty());
        assert!(forge.rules_engine().config().stop_on_first_match);
    }

    #[test]
    fn test_builder_with_options() {
        let builder = RuleForgeBuilder::new()
            .with_log_results(true)
            .with_stop_on_first_match(false)
            .with_fail_open(false);

        assert!(builder.config().engine.log_results);
        let forge = builder.build();
        assert!(!forge.transformer_service().fail_open());
        assert!(!forge.rules_engine().config().stop_on_first_match);
    }

    #[test]
    fn test_services_share_registry() {
        let forge = RuleForge::default();
        forge
            .validation_service()
            .register_validator(FnValidator::new("non-empty", |s: &String| !s.is_empty()));
        assert!(forge.registry().contains("non-empty"));
        assert!(forge.transformer_service().registry().contains("non-empty"));
    }

    #[test]
    fn test_custom_runtime() {
        let runtime = |condition: &str, _: &FactContext| -> ruleforge_runtime::Result<Value> {
            match condition {
                "yes" => Ok(Value::Bool(true)),
                "no" => Ok(Value::Bool(false)),
                other => Err(RuntimeError::InvalidOperation(other.to_string())),
            }
        };
        let forge = RuleForgeBuilder::new().with_runtime(Arc::new(runtime)).build();

        assert!(forge.rules_engine().check("yes", &FactContext::new()));
        assert!(!forge.rules_engine().check("no", &FactContext::new()));
        assert!(!forge.rules_engine().check("#value > 1", &FactContext::new()));
    }
}
