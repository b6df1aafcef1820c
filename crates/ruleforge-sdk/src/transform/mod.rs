//! Rule-driven object transformation

pub mod action;
pub mod rule;
pub mod transformer;

pub use action::{field_action, FieldAction, FieldActionBuilder};
pub use rule::TransformerRule;
pub use transformer::{GenericTransformer, Transformable, VALUE_FACT};
