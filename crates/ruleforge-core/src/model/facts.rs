//! Fact context passed to condition evaluation

use crate::error::Result;
use crate::types::Value;
use serde::Serialize;
use std::collections::HashMap;

/// Named facts available to a condition, plus an optional implicit root object
///
/// Facts not referenced by a condition are ignored. The context is owned by
/// the caller for the duration of one evaluation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactContext {
    facts: HashMap<String, Value>,
    root: Option<Value>,
}

impl FactContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_facts(facts: HashMap<String, Value>) -> Self {
        Self { facts, root: None }
    }

    /// Add a fact (builder style)
    pub fn with_fact(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set the implicit root object (builder style)
    pub fn with_root(mut self, root: impl Into<Value>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Insert or replace a fact, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.facts.insert(name.into(), value.into())
    }

    /// Serialize a value and bind it as a fact
    pub fn insert_serialized<T: Serialize + ?Sized>(
        &mut self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<()> {
        self.facts.insert(name.into(), Value::from_serialize(value)?);
        Ok(())
    }

    /// Merge another set of facts into this one; incoming facts win
    pub fn extend<I, K>(&mut self, facts: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.facts
            .extend(facts.into_iter().map(|(k, v)| (k.into(), v)));
    }

    pub fn set_root(&mut self, root: impl Into<Value>) {
        self.root = Some(root.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.facts.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.facts.contains_key(name)
    }

    pub fn root(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    pub fn facts(&self) -> &HashMap<String, Value> {
        &self.facts
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.facts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl From<HashMap<String, Value>> for FactContext {
    fn from(facts: HashMap<String, Value>) -> Self {
        Self::from_facts(facts)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for FactContext {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut ctx = FactContext::new();
        ctx.extend(iter);
        ctx
    }
}
