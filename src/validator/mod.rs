//! # Statement Validator
//!
//! Rejects syntactically malformed statements before any network call.
//! Validation is pure and deterministic, and checks surface syntax only.

mod checks;
mod rules;

pub use checks::{has_balanced_parentheses, validate};
pub use rules::{ValidationResult, ValidationRule};
