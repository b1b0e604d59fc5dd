//! Field validation engine.
//!
//! Provides rule types and a pure-logic evaluator. Entity policies are
//! ordered rule chains; the first failing rule is the one reported.

pub mod evaluator;
pub mod rules;

pub use evaluator::{is_truthy, render, require_fields};
pub use rules::{EntityPolicy, SizeBound, ValidationRule};
