//! Integration tests for the registry, validation service and builder

mod common;

use common::{forge, priced_rule, Customer, Widget};
use ruleforge_sdk::{
    EngineConfig, FnValidator, GenericTransformer, ResultType, Rule, RuleForgeBuilder, RuleResult, RulesEngine,
    ServiceRegistry, Validator,
};
use std::sync::Arc;
use std::thread;

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_unknown_validator_is_invalid() {
    let forge = forge();
    assert!(!forge.validation_service().validate("unknown", &Widget::new(1.0, "A")));
    assert!(!forge.validation_service().validate("unknown", &42));
}

#[test]
fn test_concurrent_registration() {
    let registry = ServiceRegistry::new();

    let handles: Vec<_> = ["first", "second"]
        .into_iter()
        .map(|name| {
            let registry = registry.clone();
            thread::spawn(move || {
                let transformer =
                    GenericTransformer::with_rules(name, RulesEngine::new(), vec![priced_rule()]);
                registry.register_service(name, transformer)
            })
        })
        .collect();

    for handle in handles {
        assert!(!handle.join().unwrap());
    }

    assert_eq!(registry.service_names(), vec!["first", "second"]);
    for name in ["first", "second"] {
        let transformer = registry.lookup::<GenericTransformer<Widget>>(name).unwrap();
        assert_eq!(transformer.name(), name);
    }
}

#[test]
fn test_concurrent_transform_on_shared_service() {
    let forge = forge();
    forge
        .transformer_service()
        .create_transformer("X", vec![priced_rule()]);

    let service = forge.transformer_service().clone();
    let handles: Vec<_> = (1..=4)
        .map(|i| {
            let service = service.clone();
            thread::spawn(move || service.transform("X", &Widget::new(i as f64, "W")))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().description, "W (priced)");
    }
}

#[test]
fn test_validator_and_transformer_share_registry() {
    let forge = forge();
    forge
        .transformer_service()
        .create_transformer("widget", vec![priced_rule()]);

    // A transformer is not a validator
    assert!(!forge.validation_service().validate("widget", &Widget::new(1.0, "A")));
    let result = forge.validation_service().validate_with_result("widget", &Widget::new(1.0, "A"));
    assert!(result.is_error());
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_rule_validator_over_customer() {
    let forge = forge();
    let service = forge.validation_service();
    service.create_rule_validator::<Customer>(
        "contactable-adult",
        "customer",
        vec![
            Rule::new("adult", "#customer.age >= 18", "Customer is an adult").unwrap(),
            Rule::new("email", "email != null and email.contains('@')", "Customer has an email").unwrap(),
        ],
    );

    let ok = Customer::new("Ana", 31).with_email("ana@example.com");
    let minor = Customer::new("Bo", 12).with_email("bo@example.com");
    let no_email = Customer::new("Cy", 40);

    assert!(service.validate("contactable-adult", &ok));
    assert!(!service.validate("contactable-adult", &minor));
    assert!(!service.validate("contactable-adult", &no_email));

    assert_eq!(
        service.validate_with_result("contactable-adult", &ok),
        RuleResult::matched("contactable-adult", "Validation successful for contactable-adult")
    );
    assert_eq!(
        service.validate_with_result("contactable-adult", &minor).result_type(),
        ResultType::NoMatch
    );
}

#[test]
fn test_rule_validator_uses_safe_navigation() {
    let forge = forge();
    let service = forge.validation_service();
    service.create_rule_validator::<Customer>(
        "vip",
        "customer",
        vec![Rule::new("vip", "#customer?.tags.contains('vip') ?: false", "").unwrap()],
    );

    assert!(service.validate("vip", &Customer::new("Di", 50).with_tag("vip")));
    assert!(!service.validate("vip", &Customer::new("Ed", 50)));
}

#[test]
fn test_fn_validator_registration() {
    let forge = forge();
    let service = forge.validation_service();
    service.register_validator(FnValidator::new("priced", |w: &Widget| w.price > 0.0));
    service.register_validator_as("named", FnValidator::new("ignored", |w: &Widget| !w.description.is_empty()));

    assert!(service.validate("priced", &Widget::new(1.0, "")));
    assert!(!service.validate("named", &Widget::new(1.0, "")));
    assert!(!forge.registry().contains("ignored"));
}

#[test]
fn test_returned_rule_validator_is_usable() {
    let forge = forge();
    let validator = forge.validation_service().create_rule_validator::<Widget>(
        "cheap",
        "widget",
        vec![Rule::new("cheap", "price < 10", "").unwrap()],
    );

    assert_eq!(validator.name(), "cheap");
    assert!(validator.validate(&Widget::new(5.0, "A")));
    assert_eq!(validator.evaluate(&Widget::new(50.0, "A")).len(), 1);
}

// ============================================================================
// Builder and configuration
// ============================================================================

#[test]
fn test_builder_from_config() {
    let config = EngineConfig::from_yaml(
        r#"
engine:
  stop_on_first_match: false
fail_open: false
"#,
    )
    .unwrap();

    let forge = RuleForgeBuilder::new().with_config(config).build();
    assert!(!forge.rules_engine().config().stop_on_first_match);
    assert!(!forge.transformer_service().fail_open());
    assert!(forge
        .transformer_service()
        .try_transform("missing", &Widget::new(1.0, "A"))
        .is_err());
}

#[test]
fn test_builder_shares_given_registry() {
    let registry = ServiceRegistry::new();
    let forge = RuleForgeBuilder::new().with_registry(registry.clone()).build();
    forge
        .validation_service()
        .register_validator(FnValidator::new("any", |_: &Widget| true));
    assert!(registry.contains("any"));
}

#[test]
fn test_builder_custom_runtime() {
    let runtime = Arc::new(
        |condition: &str, _: &ruleforge_sdk::FactContext| -> ruleforge_runtime::Result<ruleforge_sdk::Value> {
            Ok(ruleforge_sdk::Value::Bool(condition == "accept"))
        },
    );
    let forge = RuleForgeBuilder::new().with_runtime(runtime).build();
    let service = forge.validation_service();
    service.create_rule_validator::<Widget>(
        "accepting",
        "widget",
        vec![Rule::new("accept", "accept", "").unwrap()],
    );
    assert!(service.validate("accepting", &Widget::new(0.0, "")));
}
