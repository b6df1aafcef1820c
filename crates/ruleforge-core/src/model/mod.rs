//! Rule and result model
//!
//! - [`Rule`]: immutable named condition plus message
//! - [`RuleSet`]: named, priority-ordered collection of rules
//! - [`RuleResult`]: tagged MATCH / NO_MATCH / ERROR / NO_RULES outcome
//! - [`FactContext`]: named facts handed to condition evaluation

pub mod facts;
pub mod result;
pub mod rule;
pub mod rule_set;

pub use facts::FactContext;
pub use result::{Outcome, ResultType, RuleResult};
pub use rule::Rule;
pub use rule_set::RuleSet;
