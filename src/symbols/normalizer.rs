//! Operator spelling normalization
//!
//! Substitutions:
//! - `˄` and `^` become `∧`
//! - `˅` becomes `∨`
//! - the standalone lowercase word `v` becomes `∨`
//!
//! Word boundaries are ASCII-only: a `v` next to a non-ASCII letter such as
//! `é` still counts as standalone.
//!
//! Every substitution maps one char to one char, so caret positions counted
//! in chars survive normalization unchanged.

use std::sync::OnceLock;

use regex::Regex;

static STANDALONE_V: OnceLock<Regex> = OnceLock::new();

fn standalone_v() -> &'static Regex {
    STANDALONE_V.get_or_init(|| {
        Regex::new(r"(?-u:\b)v(?-u:\b)").expect("standalone-v pattern is valid")
    })
}

/// Canonicalize alternate operator spellings.
///
/// Pure and idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let glyphs: String = raw
        .chars()
        .map(|c| match c {
            '˄' | '^' => '∧',
            '˅' => '∨',
            c => c,
        })
        .collect();

    standalone_v().replace_all(&glyphs, "∨").into_owned()
}
