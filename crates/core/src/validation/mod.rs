//! Form validation engine.
//!
//! Provides violation types, standalone rule combinators, and the collector
//! that decides between fail-fast and collect-all reporting. All of it is
//! pure logic; related records arrive through [`crate::lookups::Lookups`].

pub mod answer;
pub mod collector;
pub mod combinators;
pub mod rules;

pub use answer::Answer;
pub use collector::{Halted, Report};
pub use rules::{FieldViolation, Rejection, RuleKind, RuleResult};
