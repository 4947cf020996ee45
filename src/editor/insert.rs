//! Caret-aware token insertion

use crate::symbols::{normalize, Operator};

use super::field::{Selection, TextField};

/// Splice `token` into `field` at the caret.
///
/// A selected range is replaced; with no known caret the token goes at the
/// end. Afterwards the field is focused and the caret sits right after the
/// inserted token. Text outside the replaced range is left untouched.
pub fn insert_at_cursor(field: &mut TextField, token: &str) {
    let len = field.len();
    let range = field.selection().unwrap_or(Selection::caret(len));

    field.splice(range, token);
    field.focus();
    field.set_caret(range.start + token.chars().count());
}

/// The text an operator button inserts.
///
/// The raw token is normalized first, then binary operators get a single
/// space on each side. `¬`, parentheses and anything else are inserted bare.
pub fn operator_token(raw: &str) -> String {
    let normalized = normalize(raw);
    let mut chars = normalized.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) if Operator::from_symbol(c).is_some_and(|op| op.is_binary()) => {
            format!(" {} ", c)
        }
        _ => normalized,
    }
}

/// Operator button press: insert the spaced token, then re-normalize the
/// whole value. Normalization is char-for-char, so the caret stays put.
pub fn press_operator(field: &mut TextField, raw: &str) {
    if raw.is_empty() {
        return;
    }
    let token = operator_token(raw);
    insert_at_cursor(field, &token);
    let normalized = normalize(field.value());
    field.replace_value_keep_caret(normalized);
}
