//! Field actions: extract / transform / apply triples
//!
//! A [`FieldAction`] describes how one field of a value changes when a
//! transformer rule fires: read the field from the original, compute the new
//! value with the evaluation facts in hand, write it into the copy.

use crate::error::{Result, SdkError};
use ruleforge_core::{FactContext, Value};
use std::fmt;
use std::sync::Arc;

type Extractor<T> = Arc<dyn Fn(&T) -> anyhow::Result<Value> + Send + Sync>;
type ValueTransform = Arc<dyn Fn(Value, &FactContext) -> anyhow::Result<Value> + Send + Sync>;
type Applier<T> = Arc<dyn Fn(&mut T, Value) -> anyhow::Result<()> + Send + Sync>;

/// One field's conditional mutation
pub struct FieldAction<T> {
    field_name: String,
    extract: Extractor<T>,
    transform: ValueTransform,
    apply: Applier<T>,
}

impl<T> FieldAction<T> {
    /// Bundle the three functions; `field_name` is only used in diagnostics
    pub fn new<E, F, A>(field_name: impl Into<String>, extract: E, transform: F, apply: A) -> Self
    where
        E: Fn(&T) -> anyhow::Result<Value> + Send + Sync + 'static,
        F: Fn(Value, &FactContext) -> anyhow::Result<Value> + Send + Sync + 'static,
        A: Fn(&mut T, Value) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            field_name: field_name.into(),
            extract: Arc::new(extract),
            transform: Arc::new(transform),
            apply: Arc::new(apply),
        }
    }

    /// Start building an action for `field_name`
    pub fn builder(field_name: impl Into<String>) -> FieldActionBuilder<T> {
        FieldActionBuilder::new(field_name)
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Read from `original`, transform with `facts`, write into `target`
    pub fn run(&self, original: &T, target: &mut T, facts: &FactContext) -> anyhow::Result<()> {
        let current = (self.extract)(original)?;
        let updated = (self.transform)(current, facts)?;
        (self.apply)(target, updated)
    }
}

impl<T> Clone for FieldAction<T> {
    fn clone(&self) -> Self {
        Self {
            field_name: self.field_name.clone(),
            extract: Arc::clone(&self.extract),
            transform: Arc::clone(&self.transform),
            apply: Arc::clone(&self.apply),
        }
    }
}

impl<T> fmt::Debug for FieldAction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAction")
            .field("field_name", &self.field_name)
            .finish_non_exhaustive()
    }
}

/// Shorthand for [`FieldAction::new`]
pub fn field_action<T, E, F, A>(
    field_name: impl Into<String>,
    extract: E,
    transform: F,
    apply: A,
) -> FieldAction<T>
where
    E: Fn(&T) -> anyhow::Result<Value> + Send + Sync + 'static,
    F: Fn(Value, &FactContext) -> anyhow::Result<Value> + Send + Sync + 'static,
    A: Fn(&mut T, Value) -> anyhow::Result<()> + Send + Sync + 'static,
{
    FieldAction::new(field_name, extract, transform, apply)
}

fn pass_through(value: Value, _: &FactContext) -> anyhow::Result<Value> {
    Ok(value)
}

/// Builder for [`FieldAction`]
///
/// The transform step defaults to passing the extracted value through.
pub struct FieldActionBuilder<T> {
    field_name: String,
    extract: Option<Extractor<T>>,
    transform: Option<ValueTransform>,
    apply: Option<Applier<T>>,
}

impl<T> FieldActionBuilder<T> {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            extract: None,
            transform: None,
            apply: None,
        }
    }

    pub fn extract<E>(mut self, extract: E) -> Self
    where
        E: Fn(&T) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.extract = Some(Arc::new(extract));
        self
    }

    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(Value, &FactContext) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Replace the field with a fixed value regardless of its current one
    pub fn set_to(self, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.transform(move |_, _| Ok(value.clone()))
    }

    pub fn apply<A>(mut self, apply: A) -> Self
    where
        A: Fn(&mut T, Value) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.apply = Some(Arc::new(apply));
        self
    }

    /// Finish the action; extract and apply are required
    pub fn build(self) -> Result<FieldAction<T>> {
        let extract = self.extract.ok_or_else(|| {
            SdkError::ConfigError(format!("field action '{}' has no extractor", self.field_name))
        })?;
        let apply = self.apply.ok_or_else(|| {
            SdkError::ConfigError(format!("field action '{}' has no setter", self.field_name))
        })?;
        let transform: ValueTransform = match self.transform {
            Some(transform) => transform,
            None => Arc::new(pass_through),
        };

        Ok(FieldAction {
            field_name: self.field_name,
            extract,
            transform,
            apply,
        })
    }
}
