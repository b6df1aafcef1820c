//! Unit tests for ruleforge-runtime
//!
//! Exercises the evaluation facade and the rules engine against realistic
//! fact contexts built from serde values.

use ruleforge_core::{FactContext, ResultType, Rule, RuleResult, RuleSet, Value, ValueKind};
use ruleforge_runtime::{
    ExpressionEvaluator, RulesEngine, RulesEngineConfig, RuntimeError,
};
use serde_json::json;

fn trade_facts() -> FactContext {
    FactContext::new()
        .with_fact(
            "trade",
            Value::from(json!({
                "id": "T-1",
                "value": 250,
                "currency": "EUR",
                "counterparty": { "name": "Acme", "rating": "AA" },
                "tags": ["fx", "spot"]
            })),
        )
        .with_fact("threshold", true)
        .with_fact("limit", 1000)
}

fn rule(name: &str, condition: &str) -> Rule {
    Rule::new(name, condition, format!("{} triggered", name)).unwrap()
}

// ========== Evaluator Tests ==========

#[test]
fn test_evaluator_nested_navigation() {
    let evaluator = ExpressionEvaluator::default();
    let facts = trade_facts();

    assert_eq!(
        evaluator.evaluate("#trade.counterparty.name", &facts).unwrap(),
        Value::from("Acme")
    );
    assert!(evaluator
        .evaluate_bool("#trade.tags.contains('spot') and #trade.value < #limit", &facts)
        .unwrap());
    assert!(evaluator
        .evaluate_bool("#trade.id matches 'T-[0-9]+'", &facts)
        .unwrap());
}

#[test]
fn test_evaluator_string_building() {
    let evaluator = ExpressionEvaluator::default();
    let facts = trade_facts();

    assert_eq!(
        evaluator
            .evaluate_as("#trade.currency + '/' + #trade.value", &facts, ValueKind::String)
            .unwrap(),
        Value::from("EUR/250")
    );
}

#[test]
fn test_evaluator_errors() {
    let evaluator = ExpressionEvaluator::default();
    let facts = trade_facts();

    assert_eq!(
        evaluator.evaluate("#unknown.value", &facts),
        Err(RuntimeError::UndefinedVariable("unknown".to_string()))
    );
    assert!(matches!(
        evaluator.evaluate("#trade.value / 0", &facts),
        Err(RuntimeError::DivisionByZero)
    ));
    assert!(matches!(
        evaluator.evaluate("#trade.currency.reverse()", &facts),
        Err(RuntimeError::UnknownMethod { .. })
    ));
}

// ========== Rules Engine Tests ==========

#[test]
fn test_evaluate_rules_length_and_order() {
    let engine = RulesEngine::new();
    let facts = trade_facts();
    let rules = vec![
        rule("large", "#trade.value > 100 && #threshold"),
        rule("undefined", "#missing > 1"),
        rule("usd", "#trade.currency == 'USD'"),
        rule("malformed", "#trade.value >"),
        rule("rated", "#trade.counterparty.rating.startsWith('A')"),
    ];

    let results = engine.evaluate_rules(&rules, &facts);

    assert_eq!(results.len(), rules.len());
    let types: Vec<ResultType> = results.iter().map(RuleResult::result_type).collect();
    assert_eq!(
        types,
        vec![
            ResultType::Match,
            ResultType::Error,
            ResultType::NoMatch,
            ResultType::Error,
            ResultType::Match,
        ]
    );
    assert_eq!(results[0].message(), Some("large triggered"));
    assert_eq!(results[1].rule_name(), Some("undefined"));
}

#[test]
fn test_undefined_fact_single_error() {
    let engine = RulesEngine::new();
    let results = engine.evaluate_rules(&[rule("r", "#nope == 1")], &FactContext::new());

    assert_eq!(results.len(), 1);
    assert!(results[0].is_error());
    assert_eq!(
        results[0].message(),
        Some("Error evaluating expression: Undefined variable: #nope")
    );
}

#[test]
fn test_evaluate_rules_empty() {
    let engine = RulesEngine::new();
    assert!(engine.evaluate_rules(&[], &trade_facts()).is_empty());
}

#[test]
fn test_execute_rules_list_empty_is_no_rules() {
    let engine = RulesEngine::new();
    assert_eq!(
        engine.execute_rules_list(&[], &trade_facts()).result_type(),
        ResultType::NoRules
    );
}

#[test]
fn test_execute_rules_list_first_match() {
    let engine = RulesEngine::new();
    let rules = vec![
        rule("usd", "#trade.currency == 'USD'"),
        rule("broken", "#missing"),
        rule("eur", "#trade.currency == 'EUR'"),
        rule("large", "#trade.value > 100"),
    ];

    let result = engine.execute_rules_list(&rules, &trade_facts());
    assert_eq!(result, RuleResult::matched("eur", "eur triggered"));
}

#[test]
fn test_execute_rules_list_error_without_match() {
    let engine = RulesEngine::new();
    let rules = vec![rule("usd", "#trade.currency == 'USD'"), rule("broken", "#missing")];

    let result = engine.execute_rules_list(&rules, &trade_facts());
    assert!(result.is_error());
    assert_eq!(result.rule_name(), Some("broken"));
}

#[test]
fn test_execute_rules_list_no_match() {
    let engine = RulesEngine::new();
    let rules = vec![rule("usd", "#trade.currency == 'USD'")];
    assert_eq!(
        engine.execute_rules_list(&rules, &trade_facts()).result_type(),
        ResultType::NoMatch
    );
}

#[test]
fn test_execute_rules_list_without_short_circuit() {
    let engine = RulesEngine::new()
        .with_config(RulesEngineConfig::new().with_stop_on_first_match(false));
    let rules = vec![rule("first", "true"), rule("second", "true")];

    let result = engine.execute_rules_list(&rules, &FactContext::new());
    assert_eq!(result.rule_name(), Some("first"));
}

#[test]
fn test_execute_rule_set_from_yaml() {
    let yaml = r##"
name: trade-checks
rules:
  - name: catch-all
    condition: ""
    message: Always applies
  - name: large
    condition: "#trade.value > 100"
    message: Large trade
    priority: 10
  - name: rated
    condition: "#trade.counterparty.rating == 'AA'"
    message: Highly rated counterparty
    priority: 5
"##;
    let rule_set = RuleSet::from_yaml(yaml).unwrap();
    let engine = RulesEngine::new();

    let result = engine.execute_rule_set(&rule_set, &trade_facts());
    assert_eq!(result.rule_name(), Some("rated"));
    assert_eq!(result.message(), Some("Highly rated counterparty"));
}

#[test]
fn test_validate_dependencies_fails_fast() {
    let engine = RulesEngine::new().with_config(
        RulesEngineConfig::new()
            .with_validate_dependencies(true)
            .with_log_results(true),
    );
    let facts = trade_facts();
    let rules = vec![
        rule("needs-fx", "#fxRate > 1 && #trade.value > 0"),
        rule("ok", "#trade.value > 0"),
    ];

    let results = engine.evaluate_rules(&rules, &facts);
    assert_eq!(results[0].message(), Some("Missing required fact: fxRate"));
    assert!(results[1].is_triggered());
}

#[test]
fn test_root_object_rules() {
    let engine = RulesEngine::new();
    let facts = FactContext::new().with_root(Value::from(json!({ "age": 17, "name": "Kim" })));

    let rules = vec![rule("adult", "age >= 18"), rule("named", "name.length() > 0")];
    let results = engine.evaluate_rules(&rules, &facts);

    assert!(!results[0].is_triggered());
    assert!(results[1].is_triggered());
}

#[test]
fn test_deeply_nested_condition_is_isolated() {
    let engine = RulesEngine::new();
    let grouped = format!("{}true{}", "(".repeat(10_000), ")".repeat(10_000));
    let negated = format!("{}true", "!".repeat(10_000));
    let rules = vec![rule("grouped", &grouped), rule("negated", &negated), rule("next", "true")];

    let results = engine.evaluate_rules(&rules, &FactContext::new());
    assert_eq!(results.len(), 3);
    for result in &results[..2] {
        assert!(result.is_error());
        assert!(result.message().unwrap().contains("nested deeper than 64 levels"));
    }
    assert_eq!(results[2], RuleResult::matched("next", "next triggered"));
}

#[test]
fn test_moderately_nested_condition_evaluates() {
    let engine = RulesEngine::new();
    let facts = FactContext::new().with_fact("n", 4);
    let condition = format!("{}#n > 3{}", "(".repeat(50), ")".repeat(50));
    assert!(engine.evaluate_rule(&rule("nested", &condition), &facts).is_triggered());
}

#[test]
fn test_max_priority_still_before_unprioritized() {
    let engine = RulesEngine::new();
    let rules = vec![
        rule("unprioritized", "true"),
        rule("last-prioritized", "true").with_priority(i32::MAX),
    ];
    let result = engine.execute_rules_list(&rules, &FactContext::new());
    assert_eq!(result.rule_name(), Some("last-prioritized"));
}
