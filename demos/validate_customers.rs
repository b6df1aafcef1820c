//! Customer validation example
//!
//! This example demonstrates:
//! - Loading a rule set and customer records from YAML
//! - Registering rule-backed and closure-backed validators
//! - Executing a prioritised rule set directly against facts

use ruleforge_sdk::{FactContext, FnValidator, RuleForgeBuilder, RuleSet};
use serde::{Deserialize, Serialize};

const CUSTOMER_RULES: &str = r##"
name: customer-checks
rules:
  - name: vip
    condition: "#customer.tags.contains('vip')"
    message: VIP customer
    priority: 1
  - name: adult
    condition: "#customer.age >= 18"
    message: Customer is an adult
    priority: 5
  - name: contactable
    condition: "#customer.email?.contains('@') ?: false"
    message: Customer can be contacted
"##;

const CUSTOMERS: &str = r#"
- name: Ana
  age: 34
  email: ana@example.com
  tags: [vip]
- name: Bo
  age: 16
"#;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Customer {
    name: String,
    age: u32,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("ruleforge_sdk=info".parse()?),
        )
        .init();

    println!("=== Customer Validation Example ===\n");

    let forge = RuleForgeBuilder::new().with_log_results(true).build();
    let validation = forge.validation_service();

    let rule_set = RuleSet::from_yaml(CUSTOMER_RULES)?;
    validation.create_rule_validator::<Customer>("customer", "customer", rule_set.rules().to_vec());
    validation.register_validator(FnValidator::new("named", |c: &Customer| !c.name.trim().is_empty()));

    let customers: Vec<Customer> = serde_yaml::from_str(CUSTOMERS)?;
    tracing::info!("Loaded {} customers", customers.len());

    for customer in &customers {
        println!("{}:", customer.name);
        println!("  named: {}", validation.validate("named", customer));
        println!("  all rules: {}", validation.validate_with_result("customer", customer));

        let facts = FactContext::new().with_fact("customer", serde_json::to_value(customer)?);
        let first = forge.rules_engine().execute_rule_set(&rule_set, &facts);
        tracing::info!(customer = %customer.name, result = %first.result_type(), "First matching rule");
        println!("  first matching rule: {}\n", first);
    }

    println!("Unknown validator: {}", validation.validate("unknown", &customers[0]));

    Ok(())
}
