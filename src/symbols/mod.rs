//! # Symbols
//!
//! The fixed operator set `¬ ∧ ∨ → ↔` and the normalizer that maps
//! alternate spellings onto it.

mod normalizer;
mod operator;

pub use normalizer::normalize;
pub use operator::{is_binary_operator, is_operator, Operator};
