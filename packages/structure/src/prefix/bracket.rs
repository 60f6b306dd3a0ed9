//! Numbers closed by a bracket: `1)`, `12)`.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, StructureError};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static BRACKET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\)").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BRACKET_VALID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\)$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq)]
pub struct BracketPrefix {
    pub prefix: String,
    pub indent: f64,
    pub number: u64,
}

impl BracketPrefix {
    pub const NAME: &'static str = "bracket";

    pub fn new(prefix: &str, indent: f64) -> Result<Self> {
        let invalid = || StructureError::InvalidPrefix {
            kind: Self::NAME,
            prefix: prefix.to_string(),
        };
        if !Self::is_valid(prefix) {
            return Err(invalid());
        }
        let number = prefix
            .trim_end_matches(')')
            .parse()
            .map_err(|_| invalid())?;
        Ok(Self {
            prefix: prefix.to_string(),
            indent,
            number,
        })
    }

    #[must_use]
    pub fn is_valid(prefix: &str) -> bool {
        BRACKET_VALID.is_match(prefix)
    }

    #[must_use]
    pub fn predecessor(&self, other: &Self) -> bool {
        other.number.checked_add(1) == Some(self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bracket(prefix: &str) -> BracketPrefix {
        BracketPrefix::new(prefix, 0.0).unwrap()
    }

    #[test]
    fn test_is_valid() {
        for valid in ["1)", "2)", "11231)", "11)"] {
            assert!(BracketPrefix::is_valid(valid));
        }
        for invalid in ["\t", "", "aa", "1.", "a)", "1.a.2", "*"] {
            assert!(!BracketPrefix::is_valid(invalid));
        }
    }

    #[test]
    fn test_predecessor() {
        let one = bracket("1)");
        let two = bracket("2)");
        let three = bracket("3)");
        assert!(two.predecessor(&one));
        assert!(three.predecessor(&two));
        assert!(!one.predecessor(&one));
        assert!(!one.predecessor(&two));
        assert!(!three.predecessor(&one));
    }

    #[test]
    fn test_predecessor_at_numeric_limit() {
        let last = bracket(&format!("{})", u64::MAX));
        assert!(!last.predecessor(&last));
        assert!(!bracket("1)").predecessor(&last));
        assert!(last.predecessor(&bracket(&format!("{})", u64::MAX - 1))));
    }

    #[test]
    fn test_invalid_token_is_error() {
        assert!(BracketPrefix::new("a)", 0.0).is_err());
    }
}
