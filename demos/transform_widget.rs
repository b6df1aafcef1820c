//! Widget transformation example
//!
//! This example demonstrates:
//! - Building RuleForge from a YAML configuration
//! - Registering a rule-driven transformer for a custom type
//! - Transforming by name and reporting outcomes

use ruleforge_sdk::{field_action, FieldAction, Rule, RuleForgeBuilder, TransformerRule, Value};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Widget {
    price: f64,
    description: String,
}

fn append_to_description(suffix: &'static str) -> FieldAction<Widget> {
    field_action(
        "description",
        |w: &Widget| Ok(Value::from(w.description.clone())),
        move |v, _| Ok(Value::from(format!("{}{}", v, suffix))),
        |w: &mut Widget, v| {
            w.description = v.into_string()?;
            Ok(())
        },
    )
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ruleforge_runtime=info".parse()?)
                .add_directive("ruleforge_sdk=debug".parse()?),
        )
        .init();

    println!("=== Widget Transformation Example ===\n");

    let forge = RuleForgeBuilder::from_config_file("demos/config/engine.yaml")?.build();
    let service = forge.transformer_service();

    let priced = TransformerRule::new(Rule::new("priced", "#value.price > 0", "Widget has a price")?)
        .on_match(append_to_description(" (priced)"))
        .on_no_match(append_to_description(" (free)"));
    service.create_transformer("X", vec![priced]);

    let widgets = [
        Widget {
            price: 10.0,
            description: "A".to_string(),
        },
        Widget {
            price: 0.0,
            description: "B".to_string(),
        },
    ];

    for widget in &widgets {
        let transformed = service.transform("X", widget);
        let result = service.transform_with_result("X", Some(widget));
        tracing::info!(?widget, ?transformed, "Transformed widget");
        println!("{:?}", widget);
        println!("  -> {:?}", transformed);
        println!("  result: {}\n", result);
    }

    // Gate the transformer on an external flag
    let mut facts = HashMap::new();
    facts.insert("promotion".to_string(), Value::Bool(true));
    let gated = service.apply_rule_condition("#promotion && #value.price < 20", &widgets[0], &facts, "X")?;
    println!("Promotion applied: {:?}", gated);

    // Unknown transformers fall back to an unmodified copy
    let fallback = service.transform("missing", &widgets[0]);
    tracing::info!(unchanged = fallback == widgets[0], "Fell back to an unmodified copy");
    println!("Unknown transformer: {:?}", fallback);
    println!("Result: {}", service.transform_with_result("missing", Some(&widgets[0])));

    Ok(())
}
