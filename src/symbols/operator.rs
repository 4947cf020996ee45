//! Canonical operator symbols

use std::fmt;

/// One of the five canonical propositional operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `¬`
    Not,
    /// `∧`
    And,
    /// `∨`
    Or,
    /// `→`
    Implies,
    /// `↔`
    Iff,
}

impl Operator {
    /// All operators in display order
    pub const ALL: [Operator; 5] = [
        Operator::Not,
        Operator::And,
        Operator::Or,
        Operator::Implies,
        Operator::Iff,
    ];

    /// The canonical glyph
    pub fn symbol(&self) -> char {
        match self {
            Operator::Not => '¬',
            Operator::And => '∧',
            Operator::Or => '∨',
            Operator::Implies => '→',
            Operator::Iff => '↔',
        }
    }

    /// Look up a canonical glyph. Alternate spellings are not recognized;
    /// normalize first.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '¬' => Some(Operator::Not),
            '∧' => Some(Operator::And),
            '∨' => Some(Operator::Or),
            '→' => Some(Operator::Implies),
            '↔' => Some(Operator::Iff),
            _ => None,
        }
    }

    /// `¬` is the only unary operator
    pub fn is_binary(&self) -> bool {
        !matches!(self, Operator::Not)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// True for any of `¬ ∧ ∨ → ↔`
pub fn is_operator(c: char) -> bool {
    Operator::from_symbol(c).is_some()
}

/// True for `∧ ∨ → ↔`
pub fn is_binary_operator(c: char) -> bool {
    Operator::from_symbol(c).is_some_and(|op| op.is_binary())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_roundtrip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
        }
    }

    #[test]
    fn test_only_negation_is_unary() {
        assert!(!Operator::Not.is_binary());
        assert!(is_binary_operator('↔'));
        assert!(!is_binary_operator('¬'));
        assert!(is_operator('¬'));
        assert!(!is_operator('^'));
    }
}
