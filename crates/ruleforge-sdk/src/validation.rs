//! Validators and the validation service
//!
//! A [`Validator<T>`] answers "is this value valid". Validators are
//! registered by name in the shared [`ServiceRegistry`]; the
//! [`ValidationService`] looks them up and treats an unknown name or a
//! validator for another type as "invalid".

use crate::registry::{LookupError, ServiceRegistry};
use ruleforge_core::{FactContext, Rule, RuleResult, Value};
use ruleforge_runtime::RulesEngine;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Validation capability for values of type `T`
pub trait Validator<T: ?Sized>: Send + Sync {
    fn name(&self) -> &str;

    fn validate(&self, value: &T) -> bool;

    fn validate_with_result(&self, value: &T) -> RuleResult {
        if self.validate(value) {
            RuleResult::matched(self.name(), format!("Validation successful for {}", self.name()))
        } else {
            RuleResult::no_match()
        }
    }
}

/// Registry representation of a validator for `T`
pub type SharedValidator<T> = Arc<dyn Validator<T>>;

/// Validator backed by a predicate closure
pub struct FnValidator<T, F> {
    name: String,
    predicate: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T, F> FnValidator<T, F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    pub fn new(name: impl Into<String>, predicate: F) -> Self {
        Self {
            name: name.into(),
            predicate,
            _marker: PhantomData,
        }
    }
}

impl<T, F> Validator<T> for FnValidator<T, F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

/// Validator backed by rules
///
/// The value is bound both as fact `fact_name` and as the root object, so
/// conditions may use `#customer.age` or plain `age`. The value is valid
/// iff every rule matches.
pub struct RuleValidator<T> {
    name: String,
    fact_name: String,
    rules: Vec<Rule>,
    rules_engine: RulesEngine,
    _marker: PhantomData<fn(&T)>,
}

impl<T: Serialize> RuleValidator<T> {
    pub fn new(
        name: impl Into<String>,
        fact_name: impl Into<String>,
        rules: Vec<Rule>,
        rules_engine: RulesEngine,
    ) -> Self {
        Self {
            name: name.into(),
            fact_name: fact_name.into(),
            rules,
            rules_engine,
            _marker: PhantomData,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Evaluate every rule against `value`, one result per rule
    pub fn evaluate(&self, value: &T) -> Vec<RuleResult> {
        match Value::from_serialize(value) {
            Ok(bound) => {
                let facts = FactContext::new()
                    .with_fact(self.fact_name.clone(), bound.clone())
                    .with_root(bound);
                self.rules_engine.evaluate_rules(&self.rules, &facts)
            }
            Err(e) => {
                tracing::warn!(validator = %self.name, "Cannot bind value for validation: {}", e);
                vec![RuleResult::error(&self.name, format!("Cannot bind value: {}", e))]
            }
        }
    }
}

impl<T: Serialize> Validator<T> for RuleValidator<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, value: &T) -> bool {
        self.evaluate(value).iter().all(RuleResult::is_triggered)
    }

    /// Like the default, but a failing rule's `Error` is reported as is
    fn validate_with_result(&self, value: &T) -> RuleResult {
        let results = self.evaluate(value);
        if results.iter().all(RuleResult::is_triggered) {
            return RuleResult::matched(&self.name, format!("Validation successful for {}", self.name));
        }
        results
            .into_iter()
            .find(RuleResult::is_error)
            .unwrap_or_else(RuleResult::no_match)
    }
}

impl<T> fmt::Debug for RuleValidator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleValidator")
            .field("name", &self.name)
            .field("fact_name", &self.fact_name)
            .field("rules", &self.rules)
            .finish()
    }
}

/// Validation by registered validator name
#[derive(Debug, Clone)]
pub struct ValidationService {
    registry: ServiceRegistry,
    rules_engine: RulesEngine,
}

impl ValidationService {
    pub fn new(registry: ServiceRegistry, rules_engine: RulesEngine) -> Self {
        Self {
            registry,
            rules_engine,
        }
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Register a validator under its own name
    pub fn register_validator<T, V>(&self, validator: V)
    where
        T: ?Sized + 'static,
        V: Validator<T> + 'static,
    {
        let name = validator.name().to_string();
        self.register_validator_as(name, validator);
    }

    /// Register a validator under an explicit name
    pub fn register_validator_as<T, V>(&self, name: impl Into<String>, validator: V)
    where
        T: ?Sized + 'static,
        V: Validator<T> + 'static,
    {
        let shared: SharedValidator<T> = Arc::new(validator);
        self.registry.register_service(name, shared);
    }

    /// Build and register a rule-backed validator
    pub fn create_rule_validator<T>(
        &self,
        name: impl Into<String>,
        fact_name: impl Into<String>,
        rules: Vec<Rule>,
    ) -> Arc<RuleValidator<T>>
    where
        T: Serialize + 'static,
    {
        let name = name.into();
        let validator = Arc::new(RuleValidator::new(
            name.clone(),
            fact_name,
            rules,
            self.rules_engine.clone(),
        ));
        let shared: SharedValidator<T> = validator.clone();
        self.registry.register_service(name, shared);
        validator
    }

    fn lookup<T: ?Sized + 'static>(&self, name: &str) -> Result<SharedValidator<T>, LookupError> {
        self.registry
            .lookup::<SharedValidator<T>>(name)
            .map(|shared| Arc::clone(&*shared))
    }

    /// Validate with the named validator; unknown or incompatible means invalid
    pub fn validate<T: ?Sized + 'static>(&self, name: &str, value: &T) -> bool {
        match self.lookup::<T>(name) {
            Ok(validator) => validator.validate(value),
            Err(e) => {
                tracing::warn!("Validation with '{}' treated as invalid: {}", name, e);
                false
            }
        }
    }

    /// Validate with the named validator, reporting lookup failures as `Error`
    pub fn validate_with_result<T: ?Sized + 'static>(&self, name: &str, value: &T) -> RuleResult {
        match self.lookup::<T>(name) {
            Ok(validator) => validator.validate_with_result(value),
            Err(LookupError::NotFound(_)) => RuleResult::error(name, "Validator not found"),
            Err(LookupError::TypeMismatch { actual, .. }) => RuleResult::error(
                name,
                format!(
                    "Validator cannot handle type: {} (registered as {})",
                    std::any::type_name::<T>(),
                    actual
                ),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruleforge_core::ResultType;

    #[derive(Serialize)]
    struct Customer {
        name: String,
        age: u32,
    }

    fn customer(age: u32) -> Customer {
        Customer {
            name: "Kim".to_string(),
            age,
        }
    }

    fn service() -> ValidationService {
        ValidationService::new(ServiceRegistry::new(), RulesEngine::new())
    }

    #[test]
    fn test_fn_validator() {
        let validator = FnValidator::new("positive", |n: &i32| *n > 0);
        assert!(validator.validate(&5));
        assert_eq!(
            validator.validate_with_result(&5),
            RuleResult::matched("positive", "Validation successful for positive")
        );
        assert_eq!(validator.validate_with_result(&-1).result_type(), ResultType::NoMatch);
    }

    #[test]
    fn test_rule_validator() {
        let rules = vec![
            Rule::new("adult", "#customer.age >= 18", "adult").unwrap(),
            Rule::new("named", "name.length() > 0", "named").unwrap(),
        ];
        let validator = RuleValidator::new("customer", "customer", rules, RulesEngine::new());

        assert!(validator.validate(&customer(30)));
        assert!(!validator.validate(&customer(12)));
    }

    #[test]
    fn test_rule_validator_reports_errors() {
        let rules = vec![Rule::new("broken", "#customer.age >= #minimum", "").unwrap()];
        let validator = RuleValidator::new("customer", "customer", rules, RulesEngine::new());
        assert!(validator.validate_with_result(&customer(30)).is_error());
    }

    #[test]
    fn test_service_validate() {
        let service = service();
        service.register_validator(FnValidator::new("positive", |n: &i32| *n > 0));

        assert!(service.validate("positive", &3));
        assert!(!service.validate("positive", &-3));
        assert!(!service.validate("unknown", &3));
        // Registered for i32, asked about a String
        assert!(!service.validate("positive", &"3".to_string()));
    }

    #[test]
    fn test_service_validate_with_result_lookup_errors() {
        let service = service();
        service.register_validator(FnValidator::new("positive", |n: &i32| *n > 0));

        let missing = service.validate_with_result("unknown", &1);
        assert_eq!(missing, RuleResult::error("unknown", "Validator not found"));

        let mismatch = service.validate_with_result("positive", &1.5f64);
        assert!(mismatch.is_error());
        assert!(mismatch.message().unwrap().starts_with("Validator cannot handle type: f64"));
    }

    #[test]
    fn test_create_rule_validator_registers() {
        let service = service();
        service.create_rule_validator::<Customer>(
            "adult-customer",
            "customer",
            vec![Rule::new("adult", "#customer.age >= 18", "adult").unwrap()],
        );
        assert!(service.validate("adult-customer", &customer(40)));
        assert!(!service.validate("adult-customer", &customer(4)));
    }
}
