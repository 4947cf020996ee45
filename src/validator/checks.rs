//! Statement surface-syntax validation
//!
//! Checks run in a fixed order and stop at the first failure, so the
//! reported message is always the most fundamental problem:
//!
//! 1. empty after trim
//! 2. character whitelist
//! 3. parenthesis balance
//! 4. (whitespace runs collapsed for the checks below)
//! 5. trailing binary operator
//! 6. leading binary operator (`¬` may lead)
//! 7. two operators in a row, any of `¬ ∧ ∨ → ↔`
//! 8. empty `()`
//!
//! Nothing here checks arity or meaning; that is the backend parser's job.

use crate::symbols::{is_binary_operator, is_operator};

use super::rules::{ValidationResult, ValidationRule};

/// Validate one statement.
///
/// The input is expected to be normalized already; alternate spellings such
/// as `^` fail the whitelist.
pub fn validate(raw: &str) -> ValidationResult {
    match first_violation(raw) {
        Some(rule) => ValidationResult::rejected(rule),
        None => ValidationResult::valid(),
    }
}

fn first_violation(raw: &str) -> Option<ValidationRule> {
    let expr = raw.trim();
    if expr.is_empty() {
        return Some(ValidationRule::Empty);
    }

    if !expr.chars().all(is_allowed) {
        return Some(ValidationRule::InvalidCharacter);
    }

    if !has_balanced_parentheses(expr) {
        return Some(ValidationRule::UnbalancedParentheses);
    }

    let collapsed = collapse_whitespace(expr);

    if collapsed.trim_end().chars().last().is_some_and(is_binary_operator) {
        return Some(ValidationRule::TrailingOperator);
    }

    if collapsed.trim_start().chars().next().is_some_and(is_binary_operator) {
        return Some(ValidationRule::LeadingOperator);
    }

    if has_adjacent_operators(&collapsed) {
        return Some(ValidationRule::AdjacentOperators);
    }

    if has_empty_parentheses(&collapsed) {
        return Some(ValidationRule::EmptyParentheses);
    }

    None
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || c == '(' || c == ')' || is_operator(c)
}

/// Single left-to-right pass over a depth counter.
///
/// Fails as soon as a `)` has no matching open, and at the end if any open
/// is left.
pub fn has_balanced_parentheses(expr: &str) -> bool {
    let mut depth: i64 = 0;
    for c in expr.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

fn collapse_whitespace(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len());
    let mut in_space = false;
    for c in expr.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

fn has_adjacent_operators(expr: &str) -> bool {
    let mut previous_was_operator = false;
    for c in expr.chars().filter(|c| !c.is_whitespace()) {
        let current = is_operator(c);
        if current && previous_was_operator {
            return true;
        }
        previous_was_operator = current;
    }
    false
}

fn has_empty_parentheses(expr: &str) -> bool {
    let mut open = false;
    for c in expr.chars() {
        match c {
            '(' => open = true,
            ')' if open => return true,
            c if c.is_whitespace() => {}
            _ => open = false,
        }
    }
    false
}
