//! Dotted numeric prefixes: `1.`, `1.2`, `1.2.3.`.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, StructureError};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static DOTTED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+\.)+(\d+\.?)?(\s|$)").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DOTTED_VALID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.)*\d+\.?$").expect("valid regex"));

/// Numbered list token with dot-separated components.
#[derive(Debug, Clone, PartialEq)]
pub struct DottedPrefix {
    pub prefix: String,
    pub indent: f64,
    pub numbers: Vec<u32>,
}

impl DottedPrefix {
    pub const NAME: &'static str = "dotted";

    /// Parse a token such as `1.2.`.
    pub fn new(prefix: &str, indent: f64) -> Result<Self> {
        if !Self::is_valid(prefix) {
            return Err(StructureError::InvalidPrefix {
                kind: Self::NAME,
                prefix: prefix.to_string(),
            });
        }
        let numbers = prefix
            .split('.')
            .filter(|n| !n.is_empty())
            .map(str::parse)
            .collect::<std::result::Result<Vec<u32>, _>>()
            .map_err(|_| StructureError::InvalidPrefix {
                kind: Self::NAME,
                prefix: prefix.to_string(),
            })?;
        Ok(Self {
            prefix: prefix.to_string(),
            indent,
            numbers,
        })
    }

    #[must_use]
    pub fn is_valid(prefix: &str) -> bool {
        DOTTED_VALID.is_match(prefix)
    }

    /// Whether `other` directly precedes this item.
    ///
    /// Same depth: previous sibling. One level deeper: `other` is the parent
    /// and this is its first child. Shallower: `other` is the last descendant
    /// of the previous sibling.
    #[must_use]
    pub fn predecessor(&self, other: &Self) -> bool {
        let this = &self.numbers;
        let that = &other.numbers;
        let (Some((&last, head)), false) = (this.split_last(), that.is_empty()) else {
            return false;
        };

        if this.len() == that.len() {
            head == &that[..that.len() - 1] && that[that.len() - 1].checked_add(1) == Some(last)
        } else if this.len() == that.len() + 1 {
            head == that.as_slice() && last == 1
        } else if that.len() > this.len() {
            head == &that[..head.len()] && that[head.len()].checked_add(1) == Some(last)
        } else {
            false
        }
    }
}
