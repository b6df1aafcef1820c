//! Common fixtures for SDK integration tests

#![allow(dead_code)]

use ruleforge_sdk::{field_action, FieldAction, Rule, RuleForge, RuleForgeBuilder, TransformerRule, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub price: f64,
    pub description: String,
}

impl Widget {
    pub fn new(price: f64, description: &str) -> Self {
        Self {
            price,
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub age: u32,
    pub email: Option<String>,
    pub tags: Vec<String>,
}

impl Customer {
    pub fn new(name: &str, age: u32) -> Self {
        Self {
            name: name.to_string(),
            age,
            email: None,
            tags: Vec::new(),
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }
}

/// Build a forge with default settings
pub fn forge() -> RuleForge {
    RuleForgeBuilder::new().build()
}

/// Action appending `suffix` to a widget's description
pub fn append_to_description(suffix: &'static str) -> FieldAction<Widget> {
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

/// Action setting a widget's price from the `price` fact, or `fallback`
pub fn reprice_from_fact(fallback: f64) -> FieldAction<Widget> {
    field_action(
        "price",
        |w: &Widget| Ok(Value::from(w.price)),
        move |_, facts| Ok(facts.get("price").cloned().unwrap_or(Value::Number(fallback))),
        |w: &mut Widget, v| {
            w.price = v.deserialize_into()?;
            Ok(())
        },
    )
}

/// `#value.price > 0` → append " (priced)"
pub fn priced_rule() -> TransformerRule<Widget> {
    TransformerRule::new(Rule::new("priced", "#value.price > 0", "Widget has a price").unwrap())
        .on_match(append_to_description(" (priced)"))
}
