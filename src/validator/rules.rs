//! Validation rules and their user-facing messages

use std::fmt;

/// A surface-syntax rule, in the order the validator applies them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationRule {
    /// Nothing but whitespace
    Empty,
    /// Character outside letters, digits, whitespace, parens and operators
    InvalidCharacter,
    /// A `)` with no open, or opens left unclosed
    UnbalancedParentheses,
    /// Ends with `∧ ∨ → ↔`
    TrailingOperator,
    /// Starts with `∧ ∨ → ↔`
    LeadingOperator,
    /// Two operator symbols with only whitespace between
    AdjacentOperators,
    /// `()` with only whitespace inside
    EmptyParentheses,
}

impl ValidationRule {
    /// Rules in evaluation order
    pub const ORDER: [ValidationRule; 7] = [
        ValidationRule::Empty,
        ValidationRule::InvalidCharacter,
        ValidationRule::UnbalancedParentheses,
        ValidationRule::TrailingOperator,
        ValidationRule::LeadingOperator,
        ValidationRule::AdjacentOperators,
        ValidationRule::EmptyParentheses,
    ];

    /// Message shown to the user when this rule rejects a statement
    pub fn message(&self) -> &'static str {
        match self {
            ValidationRule::Empty => "Type a logical statement first.",
            ValidationRule::InvalidCharacter => {
                "Invalid character found. Use letters, numbers, (), and operators ¬ ∧ ∨ → ↔ only."
            }
            ValidationRule::UnbalancedParentheses => "Unbalanced parentheses. Check your ( and ).",
            ValidationRule::TrailingOperator => "Expression cannot end with an operator.",
            ValidationRule::LeadingOperator => "Expression cannot start with a binary operator.",
            ValidationRule::AdjacentOperators => "Two operators in a row. Check your expression.",
            ValidationRule::EmptyParentheses => {
                "Empty parentheses detected. Remove () or add content."
            }
        }
    }

    /// Short machine-readable name, used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationRule::Empty => "EMPTY",
            ValidationRule::InvalidCharacter => "INVALID_CHARACTER",
            ValidationRule::UnbalancedParentheses => "UNBALANCED_PARENTHESES",
            ValidationRule::TrailingOperator => "TRAILING_OPERATOR",
            ValidationRule::LeadingOperator => "LEADING_OPERATOR",
            ValidationRule::AdjacentOperators => "ADJACENT_OPERATORS",
            ValidationRule::EmptyParentheses => "EMPTY_PARENTHESES",
        }
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of validating one statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub ok: bool,
    pub message: String,
    /// The rule that rejected the statement, `None` when `ok`
    pub rule: Option<ValidationRule>,
}

impl ValidationResult {
    /// Message reported for a statement that passes every rule
    pub const VALID_MESSAGE: &'static str = "Valid expression.";

    /// A passing result
    pub fn valid() -> Self {
        Self {
            ok: true,
            message: Self::VALID_MESSAGE.to_string(),
            rule: None,
        }
    }

    /// A failing result for `rule`
    pub fn rejected(rule: ValidationRule) -> Self {
        Self {
            ok: false,
            message: rule.message().to_string(),
            rule: Some(rule),
        }
    }
}
